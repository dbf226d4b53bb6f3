use crate::models::audio_models::ChannelSelection;
use crate::models::error::ReaderError;
use crate::processing::signal::{self, SampleFormat, Samples};

/// The channel data a [`ChannelSelector`] extracts from one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelView<'a> {
    /// Mono input, passed through untouched.
    Raw { data: &'a [u8], format: SampleFormat },
    /// One extracted or averaged channel.
    Channel(Samples),
    /// Every channel, separated, in original order.
    Channels(Vec<Samples>),
}

impl ChannelView<'_> {
    /// Number of channel sequences in this view.
    pub fn channel_count(&self) -> usize {
        match self {
            Self::Raw { .. } | Self::Channel(_) => 1,
            Self::Channels(channels) => channels.len(),
        }
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        match self {
            Self::Raw { data, format } => data.len() / format.width(),
            Self::Channel(samples) => samples.len(),
            Self::Channels(channels) => channels.first().map_or(0, Samples::len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode back to raw bytes. Separated channels are laid out one after
    /// another (planar), not re-interleaved.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Raw { data, .. } => data.to_vec(),
            Self::Channel(samples) => samples.to_bytes(),
            Self::Channels(channels) => channels.iter().flat_map(Samples::to_bytes).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Identity,
    Single(usize),
    AverageStereo,
    Average,
    Separate,
}

/// Extracts the channel(s) of interest from interleaved blocks.
///
/// Built once by [`make_channel_selector`] and applied to every block, so all
/// argument checking happens up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSelector {
    format: SampleFormat,
    channels: usize,
    selection: Selection,
}

impl ChannelSelector {
    pub fn select<'a>(&self, data: &'a [u8]) -> ChannelView<'a> {
        match self.selection {
            Selection::Identity => ChannelView::Raw {
                data,
                format: self.format,
            },
            Selection::Single(index) => {
                ChannelView::Channel(signal::extract_single_channel(data, self.format, self.channels, index))
            }
            Selection::AverageStereo => ChannelView::Channel(signal::compute_average_channel_stereo(data, self.format)),
            Selection::Average => {
                ChannelView::Channel(signal::compute_average_channel(data, self.format, self.channels))
            }
            Selection::Separate => ChannelView::Channels(signal::separate_channels(data, self.format, self.channels)),
        }
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// True when every channel is returned separately (multi-channel "any").
    pub fn is_separating(&self) -> bool {
        self.selection == Selection::Separate
    }

    pub fn is_identity(&self) -> bool {
        self.selection == Selection::Identity
    }
}

/// Build a selector for blocks of `channels` interleaved samples of
/// `sample_width` bytes.
///
/// Mono input always gets the identity selector, whatever `selected` is.
pub fn make_channel_selector(
    sample_width: u8,
    channels: u16,
    selected: ChannelSelection,
) -> Result<ChannelSelector, ReaderError> {
    let format = SampleFormat::from_width(sample_width)
        .ok_or_else(|| ReaderError::invalid(format!("sample_width must be 1, 2 or 4, given: {}", sample_width)))?;
    if channels == 0 {
        return Err(ReaderError::invalid("channels must be > 0"));
    }
    let count = channels as usize;

    let selection = if channels == 1 {
        Selection::Identity
    } else {
        match selected {
            ChannelSelection::Index(index) => {
                let normalized = if index < 0 { index + channels as i32 } else { index };
                if normalized < 0 || normalized >= channels as i32 {
                    return Err(ReaderError::invalid(format!(
                        "selected channel must be >= -channels and < channels, given: {}",
                        index
                    )));
                }
                Selection::Single(normalized as usize)
            }
            ChannelSelection::Average if channels == 2 => Selection::AverageStereo,
            ChannelSelection::Average => Selection::Average,
            ChannelSelection::Any => Selection::Separate,
        }
    };

    Ok(ChannelSelector {
        format,
        channels: count,
        selection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode16(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn rejects_bad_sample_width() {
        for width in [0, 3, 8] {
            let err = make_channel_selector(width, 2, ChannelSelection::Any).unwrap_err();
            assert!(matches!(err, ReaderError::InvalidArgument(_)));
        }
    }

    #[test]
    fn mono_is_identity_for_every_mode() {
        let data = encode16(&[1, -2, 3]);
        for mode in [
            ChannelSelection::Index(0),
            ChannelSelection::Index(7),
            ChannelSelection::Average,
            ChannelSelection::Any,
        ] {
            let selector = make_channel_selector(2, 1, mode).unwrap();
            assert!(selector.is_identity());
            let view = selector.select(&data);
            assert!(matches!(view, ChannelView::Raw { .. }));
            assert_eq!(view.to_bytes(), data);
            assert_eq!(view.len(), 3);
        }
    }

    #[test]
    fn negative_index_counts_from_last_channel() {
        let data = encode16(&[0, 1, 2, 3, 10, 11, 12, 13]);
        let last = make_channel_selector(2, 4, ChannelSelection::Index(-1)).unwrap();
        let third = make_channel_selector(2, 4, ChannelSelection::Index(3)).unwrap();
        assert_eq!(last, third);
        assert_eq!(last.select(&data), ChannelView::Channel(Samples::new(SampleFormat::Int16, vec![3, 13])));
    }

    #[test]
    fn index_out_of_range() {
        assert!(make_channel_selector(2, 4, ChannelSelection::Index(4)).is_err());
        assert!(make_channel_selector(2, 4, ChannelSelection::Index(-5)).is_err());
        assert!(make_channel_selector(2, 4, ChannelSelection::Index(-4)).is_ok());
    }

    #[test]
    fn single_channel_output_length() {
        for (width, channels) in [(1u8, 2u16), (2, 3), (4, 5)] {
            let frames = 7;
            let data = vec![0u8; frames * width as usize * channels as usize];
            let selector = make_channel_selector(width, channels, ChannelSelection::Index(1)).unwrap();
            let view = selector.select(&data);
            assert_eq!(view.len(), frames);
            assert_eq!(view.to_bytes().len(), frames * width as usize);
        }
    }

    #[test]
    fn average_two_channels() {
        let data = encode16(&[10, 20, 30, 40]);
        let selector = make_channel_selector(2, 2, ChannelSelection::Average).unwrap();
        let view = selector.select(&data);
        assert_eq!(view, ChannelView::Channel(Samples::new(SampleFormat::Int16, vec![15, 35])));
        assert_eq!(view.to_bytes(), encode16(&[15, 35]));
    }

    #[test]
    fn average_three_channels() {
        let data: Vec<u8> = [3i8, 6, 9, -1, -2, -3].iter().map(|v| *v as u8).collect();
        let selector = make_channel_selector(1, 3, ChannelSelection::Average).unwrap();
        assert_eq!(
            selector.select(&data),
            ChannelView::Channel(Samples::new(SampleFormat::Int8, vec![6, -2]))
        );
    }

    #[test]
    fn any_separates_channels() {
        let data = encode16(&[1, 10, 2, 20]);
        let selector = make_channel_selector(2, 2, ChannelSelection::Any).unwrap();
        assert!(selector.is_separating());
        let view = selector.select(&data);
        assert_eq!(view.channel_count(), 2);
        assert_eq!(view.len(), 2);
        assert_eq!(view.to_bytes(), encode16(&[1, 2, 10, 20]));
    }
}
