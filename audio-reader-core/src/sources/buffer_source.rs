use crate::models::audio_models::StreamParams;
use crate::models::error::ReaderError;
use crate::traits::audio_source::AudioSource;

/// Rewindable audio source over raw interleaved bytes held in memory.
///
/// Starts closed; call [`open`](AudioSource::open) before reading.
#[derive(Debug, Clone)]
pub struct BufferAudioSource {
    data: Vec<u8>,
    params: StreamParams,
    position: usize,
    is_open: bool,
}

impl BufferAudioSource {
    pub fn new(data: Vec<u8>, params: StreamParams) -> Result<Self, ReaderError> {
        params.validate()?;
        check_frame_alignment(&data, &params)?;
        Ok(Self {
            data,
            params,
            position: 0,
            is_open: false,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the buffer and move back to its start.
    pub fn set_data(&mut self, data: Vec<u8>) -> Result<(), ReaderError> {
        check_frame_alignment(&data, &self.params)?;
        self.data = data;
        self.position = 0;
        Ok(())
    }

    /// Extend the buffer; the read position is unchanged.
    pub fn append_data(&mut self, data: &[u8]) -> Result<(), ReaderError> {
        check_frame_alignment(data, &self.params)?;
        self.data.extend_from_slice(data);
        Ok(())
    }

    /// Current read position in samples.
    pub fn position(&self) -> usize {
        self.position / self.params.bytes_per_frame()
    }

    pub fn set_position(&mut self, position: usize) -> Result<(), ReaderError> {
        let frames = self.data.len() / self.params.bytes_per_frame();
        if position > frames {
            return Err(ReaderError::invalid(format!(
                "position {} is beyond the end of data ({} samples)",
                position, frames
            )));
        }
        self.position = position * self.params.bytes_per_frame();
        Ok(())
    }

    pub fn position_secs(&self) -> f64 {
        self.params.duration_of(self.position())
    }

    pub fn set_position_secs(&mut self, seconds: f64) -> Result<(), ReaderError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ReaderError::invalid(format!("position must be >= 0, given: {}", seconds)));
        }
        self.set_position(self.params.samples_for(seconds))
    }
}

fn check_frame_alignment(data: &[u8], params: &StreamParams) -> Result<(), ReaderError> {
    let frame = params.bytes_per_frame();
    if data.len() % frame != 0 {
        return Err(ReaderError::invalid(format!(
            "data length ({}) must be a multiple of sample_width * channels ({})",
            data.len(),
            frame
        )));
    }
    Ok(())
}

impl AudioSource for BufferAudioSource {
    fn open(&mut self) -> Result<(), ReaderError> {
        self.is_open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), ReaderError> {
        self.is_open = false;
        self.position = 0;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.is_open
    }

    fn read(&mut self, size: usize) -> Result<Option<Vec<u8>>, ReaderError> {
        if !self.is_open {
            return Err(ReaderError::SourceUnavailable("audio stream is not open".into()));
        }
        if self.position >= self.data.len() {
            return Ok(None);
        }
        let wanted = size.saturating_mul(self.params.bytes_per_frame());
        let end = self.position.saturating_add(wanted).min(self.data.len());
        let block = self.data[self.position..end].to_vec();
        self.position = end;
        Ok(Some(block))
    }

    fn rewind(&mut self) -> Result<(), ReaderError> {
        self.position = 0;
        Ok(())
    }

    fn is_rewindable(&self) -> bool {
        true
    }

    fn sampling_rate(&self) -> u32 {
        self.params.sampling_rate
    }

    fn sample_width(&self) -> u8 {
        self.params.sample_width
    }

    fn channels(&self) -> u16 {
        self.params.channels
    }
}
