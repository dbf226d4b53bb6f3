use crate::models::error::ReaderError;
use crate::models::state::WindowState;
use crate::reader::fixed_window::FixedSizeReader;
use crate::traits::audio_source::AudioSource;
use crate::traits::window_reader::WindowReader;

/// Reads windows that overlap their predecessor by `block_size - hop_size`
/// samples.
///
/// The first window is a full read of `block_size` samples. Each later
/// window reads only `hop_size` new samples and prefixes them with the tail
/// of the previous window (the carry buffer).
pub struct OverlapReader<S: AudioSource> {
    window: FixedSizeReader<S>,
    hop_size: usize,
    overlap_bytes: usize,
    state: WindowState,
    carry: Vec<u8>,
}

impl<S: AudioSource> OverlapReader<S> {
    pub fn new(source: S, block_dur: f64, hop_dur: f64) -> Result<Self, ReaderError> {
        if !(hop_dur < block_dur) {
            return Err(ReaderError::invalid("hop_dur should be < block_dur"));
        }
        if !hop_dur.is_finite() || hop_dur <= 0.0 {
            return Err(ReaderError::invalid(format!("hop_dur must be > 0, given: {}", hop_dur)));
        }
        let window = FixedSizeReader::new(source, block_dur)?;
        let params = window.source().params();
        let hop_size = params.samples_for(hop_dur);
        if hop_size == 0 {
            return Err(ReaderError::invalid(format!(
                "hop_dur ({:.6}) covers less than one sample at {} Hz",
                hop_dur, params.sampling_rate
            )));
        }
        let overlap_bytes = (window.block_size() - hop_size) * params.bytes_per_frame();
        Ok(Self {
            window,
            hop_size,
            overlap_bytes,
            state: WindowState::NotStarted,
            carry: Vec::with_capacity(overlap_bytes),
        })
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn block_dur(&self) -> f64 {
        self.window.block_dur()
    }

    pub fn hop_dur(&self) -> f64 {
        self.window.source().params().duration_of(self.hop_size)
    }

    fn read_first(&mut self) -> Result<Option<Vec<u8>>, ReaderError> {
        if !self.window.source().is_open() {
            return Err(ReaderError::SourceUnavailable("audio stream is not open".into()));
        }
        match self.window.read()? {
            Some(block) if !block.is_empty() => {
                self.keep_tail(&block);
                self.state = WindowState::Running;
                Ok(Some(block))
            }
            _ => Ok(self.finish()),
        }
    }

    fn read_next(&mut self) -> Result<Option<Vec<u8>>, ReaderError> {
        match self.window.source_mut().read(self.hop_size)? {
            Some(hop) if !hop.is_empty() => {
                let mut block = Vec::with_capacity(self.carry.len() + hop.len());
                block.extend_from_slice(&self.carry);
                block.extend_from_slice(&hop);
                self.keep_tail(&block);
                Ok(Some(block))
            }
            _ => Ok(self.finish()),
        }
    }

    /// Carry the trailing `block_size - hop_size` samples into the next
    /// window, or the whole block if it is shorter than that.
    fn keep_tail(&mut self, block: &[u8]) {
        self.carry.clear();
        self.carry.extend_from_slice(&block[block.len().saturating_sub(self.overlap_bytes)..]);
    }

    fn finish(&mut self) -> Option<Vec<u8>> {
        log::trace!("Overlapping window sequence exhausted");
        self.state = WindowState::Exhausted;
        self.carry.clear();
        None
    }
}

impl<S: AudioSource> WindowReader for OverlapReader<S> {
    type Source = S;

    fn read(&mut self) -> Result<Option<Vec<u8>>, ReaderError> {
        match self.state {
            WindowState::NotStarted => self.read_first(),
            WindowState::Running => self.read_next(),
            WindowState::Exhausted => Ok(None),
        }
    }

    fn rewind(&mut self) -> Result<(), ReaderError> {
        self.window.rewind()?;
        self.state = WindowState::NotStarted;
        self.carry.clear();
        Ok(())
    }

    fn block_size(&self) -> usize {
        self.window.block_size()
    }

    fn hop_size(&self) -> usize {
        self.hop_size
    }

    fn source(&self) -> &S {
        self.window.source()
    }

    fn source_mut(&mut self) -> &mut S {
        self.window.source_mut()
    }
}
