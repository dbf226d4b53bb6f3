use std::fmt;

use crate::models::audio_models::StreamParams;
use crate::models::config::ReaderConfiguration;
use crate::models::error::ReaderError;
use crate::reader::fixed_window::FixedSizeReader;
use crate::reader::limiter::Limiter;
use crate::reader::overlap::OverlapReader;
use crate::reader::recorder::Recorder;
use crate::sources::buffer_source::BufferAudioSource;
use crate::traits::audio_source::AudioSource;
use crate::traits::data_source::DataSource;
use crate::traits::window_reader::WindowReader;

type Pipeline = Box<dyn AudioSource>;

enum Windowing {
    Fixed(FixedSizeReader<Pipeline>),
    Overlap(OverlapReader<Pipeline>),
}

impl Windowing {
    fn reader(&self) -> &dyn WindowReader<Source = Pipeline> {
        match self {
            Windowing::Fixed(reader) => reader,
            Windowing::Overlap(reader) => reader,
        }
    }

    fn reader_mut(&mut self) -> &mut dyn WindowReader<Source = Pipeline> {
        match self {
            Windowing::Fixed(reader) => reader,
            Windowing::Overlap(reader) => reader,
        }
    }
}

/// Single entry point over a source and its optional layers.
///
/// Assembles `source → Recorder → Limiter → windower` from a
/// [`ReaderConfiguration`], skipping the layers that are not requested, and
/// forwards every query to the right layer.
///
/// # Example
///
/// ```
/// use audio_reader_core::{AudioReader, ReaderConfiguration, StreamParams};
///
/// let config = ReaderConfiguration { block_dur: 0.25, ..Default::default() };
/// let mut reader = AudioReader::from_bytes(b"abcdefgh".to_vec(), StreamParams::new(16, 1, 1), &config)?;
/// reader.open()?;
/// assert_eq!(reader.read()?.as_deref(), Some(&b"abcd"[..]));
/// # Ok::<(), audio_reader_core::ReaderError>(())
/// ```
pub struct AudioReader {
    windowing: Windowing,
    record: bool,
    max_read: Option<f64>,
}

impl AudioReader {
    pub fn new<S: AudioSource + 'static>(source: S, config: &ReaderConfiguration) -> Result<Self, ReaderError> {
        config.validate()?;
        let params = source.params();
        params.validate()?;

        let mut pipeline: Pipeline = Box::new(source);
        if config.record {
            pipeline = Box::new(Recorder::new(pipeline)?);
        }
        if let Some(max_read) = config.max_read {
            pipeline = Box::new(Limiter::new(pipeline, max_read)?);
        }
        let windowing = match config.hop_dur {
            Some(hop_dur) => Windowing::Overlap(OverlapReader::new(pipeline, config.block_dur, hop_dur)?),
            None => Windowing::Fixed(FixedSizeReader::new(pipeline, config.block_dur)?),
        };

        let reader = Self {
            windowing,
            record: config.record,
            max_read: config.max_read,
        };
        log::debug!(
            "Audio reader ready: {} Hz, {} byte(s), {} channel(s), block_size={}, hop_size={}, record={}, max_read={:?}",
            params.sampling_rate,
            params.sample_width,
            params.channels,
            reader.block_size(),
            reader.hop_size(),
            reader.record,
            reader.max_read
        );
        Ok(reader)
    }

    /// Reader over raw interleaved bytes held in memory.
    pub fn from_bytes(data: Vec<u8>, params: StreamParams, config: &ReaderConfiguration) -> Result<Self, ReaderError> {
        Self::new(BufferAudioSource::new(data, params)?, config)
    }

    /// Shorthand for a recording reader.
    pub fn recorder<S: AudioSource + 'static>(
        source: S,
        block_dur: f64,
        hop_dur: Option<f64>,
        max_read: Option<f64>,
    ) -> Result<Self, ReaderError> {
        let config = ReaderConfiguration {
            block_dur,
            hop_dur,
            record: true,
            max_read,
        };
        Self::new(source, &config)
    }

    /// Next window, or `Ok(None)` at end of stream.
    pub fn read(&mut self) -> Result<Option<Vec<u8>>, ReaderError> {
        self.windowing.reader_mut().read()
    }

    /// Restart from the first window. Only recording readers can rewind.
    pub fn rewind(&mut self) -> Result<(), ReaderError> {
        if !self.record {
            return Err(ReaderError::illegal_state(
                "this AudioReader is not a recorder, rewind is not possible",
            ));
        }
        self.windowing.reader_mut().rewind()?;
        log::debug!("Audio reader rewound");
        Ok(())
    }

    /// Recorded data, bounded by `max_read`. Available once rewound.
    pub fn data(&self) -> Result<&[u8], ReaderError> {
        if !self.record {
            return Err(ReaderError::illegal_state(
                "this AudioReader is not a recorder, no recorded data can be retrieved",
            ));
        }
        self.source().data()
    }

    pub fn open(&mut self) -> Result<(), ReaderError> {
        self.windowing.reader_mut().source_mut().open()
    }

    pub fn close(&mut self) -> Result<(), ReaderError> {
        self.windowing.reader_mut().source_mut().close()
    }

    pub fn is_open(&self) -> bool {
        self.source().is_open()
    }

    pub fn is_rewindable(&self) -> bool {
        self.record
    }

    pub fn sampling_rate(&self) -> u32 {
        self.source().sampling_rate()
    }

    pub fn sample_width(&self) -> u8 {
        self.source().sample_width()
    }

    pub fn channels(&self) -> u16 {
        self.source().channels()
    }

    pub fn params(&self) -> StreamParams {
        self.source().params()
    }

    pub fn block_size(&self) -> usize {
        self.windowing.reader().block_size()
    }

    /// Equal to `block_size` when windows do not overlap.
    pub fn hop_size(&self) -> usize {
        self.windowing.reader().hop_size()
    }

    pub fn block_dur(&self) -> f64 {
        self.params().duration_of(self.block_size())
    }

    pub fn hop_dur(&self) -> f64 {
        self.params().duration_of(self.hop_size())
    }

    pub fn max_read(&self) -> Option<f64> {
        self.max_read
    }

    fn source(&self) -> &Pipeline {
        self.windowing.reader().source()
    }
}

impl DataSource for AudioReader {
    type Item = Vec<u8>;

    fn read(&mut self) -> Result<Option<Vec<u8>>, ReaderError> {
        AudioReader::read(self)
    }
}

impl fmt::Display for AudioReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AudioReader(block_dur={:.3}, hop_dur={:.3}, record={}, ",
            self.block_dur(),
            self.hop_dur(),
            self.record
        )?;
        match self.max_read {
            Some(max_read) => write!(f, "max_read={:.3})", max_read),
            None => write!(f, "max_read=None)"),
        }
    }
}

impl fmt::Debug for AudioReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioReader")
            .field("params", &self.params())
            .field("block_size", &self.block_size())
            .field("hop_size", &self.hop_size())
            .field("record", &self.record)
            .field("max_read", &self.max_read)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(block_dur: f64, hop_dur: Option<f64>, record: bool, max_read: Option<f64>) -> ReaderConfiguration {
        ReaderConfiguration {
            block_dur,
            hop_dur,
            record,
            max_read,
        }
    }

    fn open_reader(data: &[u8], config: &ReaderConfiguration) -> AudioReader {
        let mut reader = AudioReader::from_bytes(data.to_vec(), StreamParams::new(16, 1, 1), config).unwrap();
        reader.open().unwrap();
        reader
    }

    fn drain(reader: &mut AudioReader) -> Vec<Vec<u8>> {
        let mut windows = Vec::new();
        while let Some(block) = reader.read().unwrap() {
            windows.push(block);
        }
        windows
    }

    #[test]
    fn plain_reader_reads_fixed_windows() {
        let mut reader = open_reader(b"abcdefghijklmnop", &config(0.25, None, false, None));
        assert_eq!(reader.block_size(), 4);
        assert_eq!(reader.hop_size(), 4);
        assert_eq!(reader.block_dur(), reader.hop_dur());
        assert!(!reader.is_rewindable());

        let windows = drain(&mut reader);
        assert_eq!(windows.len(), 4);
        assert_eq!(windows[3], b"mnop");
    }

    #[test]
    fn rewind_and_data_require_record() {
        let mut reader = open_reader(b"abcd", &config(0.25, None, false, None));
        assert!(matches!(reader.rewind(), Err(ReaderError::IllegalState(_))));
        assert!(matches!(reader.data(), Err(ReaderError::IllegalState(_))));
    }

    #[test]
    fn recorder_replays_windows() {
        let mut reader = open_reader(b"abcdefghij", &config(0.25, Some(0.125), true, None));
        let first_pass = drain(&mut reader);
        assert!(matches!(reader.data(), Err(ReaderError::IllegalState(_))));

        reader.rewind().unwrap();
        assert_eq!(reader.data().unwrap(), b"abcdefghij");
        assert_eq!(drain(&mut reader), first_pass);
    }

    #[test]
    fn limit_applies_to_data() {
        let mut reader = open_reader(b"abcdefghijklmnop", &config(0.25, None, true, Some(0.5)));
        let windows = drain(&mut reader);
        assert_eq!(windows.concat(), b"abcdefgh");

        reader.rewind().unwrap();
        assert_eq!(reader.data().unwrap(), b"abcdefgh");
        assert_eq!(drain(&mut reader), windows);
    }

    #[test]
    fn recorder_shorthand() {
        let source = BufferAudioSource::new(b"abcdefgh".to_vec(), StreamParams::new(16, 1, 1)).unwrap();
        let reader = AudioReader::recorder(source, 0.25, None, Some(1.0)).unwrap();
        assert!(reader.is_rewindable());
        assert_eq!(reader.max_read(), Some(1.0));
    }

    #[test]
    fn open_and_close_reach_the_source() {
        let mut reader = AudioReader::from_bytes(
            b"abcd".to_vec(),
            StreamParams::new(16, 1, 1),
            &config(0.25, None, true, Some(1.0)),
        )
        .unwrap();
        assert!(!reader.is_open());
        assert!(matches!(reader.read(), Err(ReaderError::SourceUnavailable(_))));
        reader.open().unwrap();
        assert!(reader.is_open());
        reader.close().unwrap();
        assert!(!reader.is_open());
    }

    #[test]
    fn forwards_stream_params() {
        let reader = AudioReader::from_bytes(Vec::new(), StreamParams::new(8000, 2, 2), &ReaderConfiguration::default())
            .unwrap();
        assert_eq!(reader.sampling_rate(), 8000);
        assert_eq!(reader.sample_width(), 2);
        assert_eq!(reader.channels(), 2);
        assert_eq!(reader.block_size(), 80);
    }

    #[test]
    fn sizes_survive_conversion_to_durations() {
        for rate in [8000, 11025, 16000, 22050, 44100, 48000] {
            for block_size in [2, 3, 147, 441, 1001, 1003, 1999] {
                let hop_size = block_size / 2;
                let params = StreamParams::new(rate, 2, 1);

                let config = ReaderConfiguration::from_sizes(block_size, None, rate).unwrap();
                let reader = AudioReader::from_bytes(Vec::new(), params, &config).unwrap();
                assert_eq!(reader.block_size(), block_size, "rate={rate}");

                let config = ReaderConfiguration::from_sizes(block_size, Some(hop_size), rate).unwrap();
                let reader = AudioReader::from_bytes(Vec::new(), params, &config).unwrap();
                assert_eq!(reader.block_size(), block_size, "rate={rate}");
                assert_eq!(reader.hop_size(), hop_size, "rate={rate}");
            }
        }
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let err = AudioReader::from_bytes(Vec::new(), StreamParams::new(16, 1, 1), &config(0.25, Some(0.5), false, None))
            .unwrap_err();
        assert!(matches!(err, ReaderError::InvalidArgument(_)));

        let err = AudioReader::from_bytes(Vec::new(), StreamParams::new(16, 1, 1), &config(0.01, None, false, None))
            .unwrap_err();
        assert!(matches!(err, ReaderError::BlockDurationTooSmall { .. }));
    }

    #[test]
    fn display_repr() {
        let reader = AudioReader::from_bytes(Vec::new(), StreamParams::new(16000, 2, 1), &ReaderConfiguration::default())
            .unwrap();
        assert_eq!(
            reader.to_string(),
            "AudioReader(block_dur=0.010, hop_dur=0.010, record=false, max_read=None)"
        );

        let reader = AudioReader::from_bytes(
            Vec::new(),
            StreamParams::new(16000, 2, 1),
            &config(0.02, Some(0.01), true, Some(2.5)),
        )
        .unwrap();
        assert_eq!(
            reader.to_string(),
            "AudioReader(block_dur=0.020, hop_dur=0.010, record=true, max_read=2.500)"
        );
    }

    #[test]
    fn reads_through_data_source_trait() {
        fn count<D: DataSource>(source: &mut D) -> usize {
            let mut n = 0;
            while source.read().unwrap().is_some() {
                n += 1;
            }
            n
        }
        let mut reader = open_reader(b"abcdefghij", &config(0.25, None, false, None));
        assert_eq!(count(&mut reader), 3);
    }
}
