use crate::models::audio_models::StreamParams;
use crate::models::error::ReaderError;

/// Capability surface shared by raw sources and the layers that wrap them.
///
/// Implemented by:
/// - `BufferAudioSource` (in-memory data)
/// - `Recorder` and `Limiter` (pipeline layers that own another source)
/// - external adapters (file decoders, capture devices)
///
/// `read` is pull-based and may block (e.g. a live device waiting for audio).
pub trait AudioSource {
    fn open(&mut self) -> Result<(), ReaderError>;

    fn close(&mut self) -> Result<(), ReaderError>;

    fn is_open(&self) -> bool;

    /// Read up to `size` samples (one value per channel each).
    ///
    /// Returns `Ok(None)` at end of stream. The returned block is always a
    /// whole number of `sample_width * channels` frames.
    fn read(&mut self, size: usize) -> Result<Option<Vec<u8>>, ReaderError>;

    /// Restart reading from the beginning of the stream.
    fn rewind(&mut self) -> Result<(), ReaderError> {
        Err(ReaderError::NotRewindable)
    }

    fn is_rewindable(&self) -> bool {
        false
    }

    /// Everything recorded so far. Only recording layers have data.
    fn data(&self) -> Result<&[u8], ReaderError> {
        Err(ReaderError::illegal_state("this source does not record data"))
    }

    fn sampling_rate(&self) -> u32;

    fn sample_width(&self) -> u8;

    fn channels(&self) -> u16;

    fn params(&self) -> StreamParams {
        StreamParams::new(self.sampling_rate(), self.sample_width(), self.channels())
    }
}

impl<S: AudioSource + ?Sized> AudioSource for Box<S> {
    fn open(&mut self) -> Result<(), ReaderError> {
        (**self).open()
    }

    fn close(&mut self) -> Result<(), ReaderError> {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn read(&mut self, size: usize) -> Result<Option<Vec<u8>>, ReaderError> {
        (**self).read(size)
    }

    fn rewind(&mut self) -> Result<(), ReaderError> {
        (**self).rewind()
    }

    fn is_rewindable(&self) -> bool {
        (**self).is_rewindable()
    }

    fn data(&self) -> Result<&[u8], ReaderError> {
        (**self).data()
    }

    fn sampling_rate(&self) -> u32 {
        (**self).sampling_rate()
    }

    fn sample_width(&self) -> u8 {
        (**self).sample_width()
    }

    fn channels(&self) -> u16 {
        (**self).channels()
    }
}
