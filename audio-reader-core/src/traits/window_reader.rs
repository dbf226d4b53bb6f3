use crate::models::error::ReaderError;
use crate::traits::audio_source::AudioSource;

/// The outermost pipeline layer: one window per `read`.
///
/// Implemented by `FixedSizeReader` and `OverlapReader`.
pub trait WindowReader {
    type Source: AudioSource;

    /// Next window, or `Ok(None)` at end of stream. The final window may be
    /// shorter than `block_size` samples.
    fn read(&mut self) -> Result<Option<Vec<u8>>, ReaderError>;

    /// Rewind the wrapped source and restart windowing from the beginning.
    fn rewind(&mut self) -> Result<(), ReaderError>;

    /// Window length in samples.
    fn block_size(&self) -> usize;

    /// Samples between the starts of consecutive windows.
    fn hop_size(&self) -> usize;

    fn source(&self) -> &Self::Source;

    fn source_mut(&mut self) -> &mut Self::Source;
}
