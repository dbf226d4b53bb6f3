use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ReaderError;

/// Rounding slack, in samples, when converting a duration back to a count.
const SAMPLE_TOLERANCE: f64 = 1e-6;

/// Sampling parameters shared by every layer of a reader pipeline.
///
/// Fixed for the lifetime of a source. A "sample" here is one frame: one
/// value per channel, `sample_width * channels` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamParams {
    pub sampling_rate: u32,
    /// Bytes per sample per channel: 1, 2 or 4.
    pub sample_width: u8,
    pub channels: u16,
}

impl StreamParams {
    pub fn new(sampling_rate: u32, sample_width: u8, channels: u16) -> Self {
        Self {
            sampling_rate,
            sample_width,
            channels,
        }
    }

    pub fn validate(&self) -> Result<(), ReaderError> {
        if self.sampling_rate == 0 {
            return Err(ReaderError::invalid("sampling rate must be positive"));
        }
        if ![1, 2, 4].contains(&self.sample_width) {
            return Err(ReaderError::invalid(format!(
                "sample width must be 1, 2 or 4, given: {}",
                self.sample_width
            )));
        }
        if self.channels == 0 {
            return Err(ReaderError::invalid("channel count must be positive"));
        }
        Ok(())
    }

    /// Bytes occupied by one multi-channel sample.
    pub fn bytes_per_frame(&self) -> usize {
        self.sample_width as usize * self.channels as usize
    }

    /// Number of whole samples covered by `seconds` (floor).
    ///
    /// Products within `SAMPLE_TOLERANCE` of a whole number snap to it, so
    /// `samples_for(duration_of(n)) == n`.
    pub fn samples_for(&self, seconds: f64) -> usize {
        let exact = seconds * self.sampling_rate as f64;
        let nearest = exact.round();
        if (exact - nearest).abs() <= SAMPLE_TOLERANCE {
            nearest as usize
        } else {
            exact.floor() as usize
        }
    }

    pub fn duration_of(&self, samples: usize) -> f64 {
        samples as f64 / self.sampling_rate as f64
    }
}

/// Which channel(s) of an interleaved block feed activity detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "SelectionRepr", into = "SelectionRepr")]
pub enum ChannelSelection {
    /// One channel; negative values count from the last channel.
    Index(i32),
    /// Arithmetic mean of all channels ("mix", "avg", "average").
    Average,
    /// Every channel separately; any of them may trigger ("any").
    #[default]
    Any,
}

impl FromStr for ChannelSelection {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mix" | "avg" | "average" => Ok(Self::Average),
            "any" => Ok(Self::Any),
            other => other.parse::<i32>().map(Self::Index).map_err(|_| {
                ReaderError::invalid(format!(
                    "selected channel must be an integer, 'any' or 'average' \
                     (alias 'avg' or 'mix'), given: '{other}'"
                ))
            }),
        }
    }
}

impl fmt::Display for ChannelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Average => f.write_str("average"),
            Self::Any => f.write_str("any"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SelectionRepr {
    Index(i32),
    Name(String),
}

impl TryFrom<SelectionRepr> for ChannelSelection {
    type Error = ReaderError;

    fn try_from(repr: SelectionRepr) -> Result<Self, Self::Error> {
        match repr {
            SelectionRepr::Index(i) => Ok(Self::Index(i)),
            SelectionRepr::Name(name) => name.parse(),
        }
    }
}

impl From<ChannelSelection> for SelectionRepr {
    fn from(selection: ChannelSelection) -> Self {
        match selection {
            ChannelSelection::Index(i) => Self::Index(i),
            other => Self::Name(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_bad_width() {
        let params = StreamParams::new(16000, 3, 1);
        assert!(matches!(params.validate(), Err(ReaderError::InvalidArgument(_))));
    }

    #[test]
    fn validate_rejects_zero_rate_and_channels() {
        assert!(StreamParams::new(0, 2, 1).validate().is_err());
        assert!(StreamParams::new(16000, 2, 0).validate().is_err());
        assert!(StreamParams::new(16000, 2, 2).validate().is_ok());
    }

    #[test]
    fn bytes_per_frame_stereo_16bit() {
        assert_eq!(StreamParams::new(48000, 2, 2).bytes_per_frame(), 4);
    }

    #[test]
    fn samples_for_inverts_duration_of() {
        for rate in [8000, 11025, 16000, 22050, 44100, 48000] {
            let params = StreamParams::new(rate, 2, 1);
            for n in 1..2000 {
                assert_eq!(params.samples_for(params.duration_of(n)), n, "n={n} rate={rate}");
            }
        }
        assert_eq!(StreamParams::new(8000, 2, 1).samples_for(1001.0 / 8000.0), 1001);
    }

    #[test]
    fn samples_for_floors() {
        let params = StreamParams::new(16, 1, 1);
        assert_eq!(params.samples_for(0.25), 4);
        assert_eq!(params.samples_for(0.05), 0);
    }

    #[test]
    fn selection_aliases() {
        for alias in ["mix", "avg", "average"] {
            assert_eq!(alias.parse::<ChannelSelection>().unwrap(), ChannelSelection::Average);
        }
        assert_eq!("any".parse::<ChannelSelection>().unwrap(), ChannelSelection::Any);
        assert_eq!("-1".parse::<ChannelSelection>().unwrap(), ChannelSelection::Index(-1));
    }

    #[test]
    fn selection_rejects_unknown_mode() {
        let err = "left".parse::<ChannelSelection>().unwrap_err();
        assert!(matches!(err, ReaderError::InvalidArgument(_)));
    }

    #[test]
    fn selection_serde_accepts_int_and_name() {
        let idx: ChannelSelection = serde_json::from_str("2").unwrap();
        assert_eq!(idx, ChannelSelection::Index(2));
        let mix: ChannelSelection = serde_json::from_str("\"mix\"").unwrap();
        assert_eq!(mix, ChannelSelection::Average);
        assert!(serde_json::from_str::<ChannelSelection>("\"bogus\"").is_err());
        assert_eq!(serde_json::to_string(&ChannelSelection::Any).unwrap(), "\"any\"");
    }
}
