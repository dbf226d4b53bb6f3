use crate::models::error::ReaderError;
use crate::traits::audio_source::AudioSource;

/// Pipeline layer capping the total number of samples read in a session.
pub struct Limiter<S: AudioSource> {
    source: S,
    max_read: f64,
    max_samples: usize,
    bytes_per_frame: usize,
    read_samples: usize,
}

impl<S: AudioSource> Limiter<S> {
    /// Limit `source` to `max_read` seconds, rounded to the nearest sample
    /// (ties to even).
    pub fn new(source: S, max_read: f64) -> Result<Self, ReaderError> {
        if !max_read.is_finite() || max_read < 0.0 {
            return Err(ReaderError::invalid(format!("max_read must be >= 0, given: {}", max_read)));
        }
        let params = source.params();
        params.validate()?;
        let max_samples = (max_read * params.sampling_rate as f64).round_ties_even() as usize;
        Ok(Self {
            source,
            max_read,
            max_samples,
            bytes_per_frame: params.bytes_per_frame(),
            read_samples: 0,
        })
    }

    pub fn max_read(&self) -> f64 {
        self.max_read
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    /// Samples returned since construction or the last rewind.
    pub fn read_samples(&self) -> usize {
        self.read_samples
    }
}

impl<S: AudioSource> AudioSource for Limiter<S> {
    fn open(&mut self) -> Result<(), ReaderError> {
        self.source.open()
    }

    fn close(&mut self) -> Result<(), ReaderError> {
        self.source.close()
    }

    fn is_open(&self) -> bool {
        self.source.is_open()
    }

    fn read(&mut self, size: usize) -> Result<Option<Vec<u8>>, ReaderError> {
        let remaining = self.max_samples.saturating_sub(self.read_samples);
        let size = remaining.min(size);
        if size == 0 {
            log::trace!("Read limit of {} samples reached", self.max_samples);
            return Ok(None);
        }
        let Some(block) = self.source.read(size)? else {
            return Ok(None);
        };
        self.read_samples += block.len() / self.bytes_per_frame;
        Ok(Some(block))
    }

    fn rewind(&mut self) -> Result<(), ReaderError> {
        self.source.rewind()?;
        self.read_samples = 0;
        Ok(())
    }

    fn is_rewindable(&self) -> bool {
        self.source.is_rewindable()
    }

    /// The wrapped source's recording, cut down to this layer's budget.
    fn data(&self) -> Result<&[u8], ReaderError> {
        let data = self.source.data()?;
        let max_bytes = self.max_samples.saturating_mul(self.bytes_per_frame);
        Ok(&data[..data.len().min(max_bytes)])
    }

    fn sampling_rate(&self) -> u32 {
        self.source.sampling_rate()
    }

    fn sample_width(&self) -> u8 {
        self.source.sample_width()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }
}
