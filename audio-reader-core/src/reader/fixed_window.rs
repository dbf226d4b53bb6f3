use crate::models::audio_models::StreamParams;
use crate::models::error::ReaderError;
use crate::traits::audio_source::AudioSource;
use crate::traits::window_reader::WindowReader;

/// Reads consecutive, non-overlapping windows of a fixed duration.
pub struct FixedSizeReader<S: AudioSource> {
    source: S,
    block_size: usize,
}

impl<S: AudioSource> FixedSizeReader<S> {
    pub fn new(source: S, block_dur: f64) -> Result<Self, ReaderError> {
        let params = source.params();
        params.validate()?;
        let block_size = block_size_for(&params, block_dur)?;
        Ok(Self { source, block_size })
    }

    /// Effective window duration, after flooring to whole samples.
    pub fn block_dur(&self) -> f64 {
        self.source.params().duration_of(self.block_size)
    }
}

/// Whole samples covered by `block_dur` at the stream's rate.
pub(crate) fn block_size_for(params: &StreamParams, block_dur: f64) -> Result<usize, ReaderError> {
    if !block_dur.is_finite() || block_dur <= 0.0 {
        return Err(ReaderError::invalid(format!("block_dur must be > 0, given: {}", block_dur)));
    }
    let block_size = params.samples_for(block_dur);
    if block_size == 0 {
        return Err(ReaderError::BlockDurationTooSmall {
            block_dur,
            sampling_rate: params.sampling_rate,
        });
    }
    Ok(block_size)
}

impl<S: AudioSource> WindowReader for FixedSizeReader<S> {
    type Source = S;

    fn read(&mut self) -> Result<Option<Vec<u8>>, ReaderError> {
        self.source.read(self.block_size)
    }

    fn rewind(&mut self) -> Result<(), ReaderError> {
        self.source.rewind()
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn hop_size(&self) -> usize {
        self.block_size
    }

    fn source(&self) -> &S {
        &self.source
    }

    fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
