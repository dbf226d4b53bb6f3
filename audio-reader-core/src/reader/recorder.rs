use crate::models::audio_models::StreamParams;
use crate::models::error::ReaderError;
use crate::models::state::RecordingMode;
use crate::sources::buffer_source::BufferAudioSource;
use crate::traits::audio_source::AudioSource;

enum Inner<S> {
    Live { source: S, cache: Vec<u8> },
    Replay(BufferAudioSource),
}

/// Pipeline layer that keeps a copy of everything it reads.
///
/// The first [`rewind`](AudioSource::rewind) turns the cache into an
/// in-memory source and every later read or rewind is served from it. The
/// wrapped source is closed and dropped at that point; there is no way back
/// to live reading.
pub struct Recorder<S: AudioSource> {
    inner: Inner<S>,
    params: StreamParams,
}

impl<S: AudioSource> Recorder<S> {
    pub fn new(source: S) -> Result<Self, ReaderError> {
        let params = source.params();
        params.validate()?;
        Ok(Self {
            inner: Inner::Live {
                source,
                cache: Vec::new(),
            },
            params,
        })
    }

    pub fn mode(&self) -> RecordingMode {
        match self.inner {
            Inner::Live { .. } => RecordingMode::Live,
            Inner::Replay(_) => RecordingMode::Replay,
        }
    }

    fn start_replay(&mut self) -> Result<(), ReaderError> {
        let Inner::Live { source, cache } = &mut self.inner else {
            return Ok(());
        };
        let frame = self.params.bytes_per_frame();
        if cache.len() % frame != 0 {
            return Err(ReaderError::invalid(format!(
                "recorded data length ({}) is not a multiple of the frame size ({})",
                cache.len(),
                frame
            )));
        }
        let mut buffer = BufferAudioSource::new(std::mem::take(cache), self.params)?;
        buffer.open()?;
        if let Err(e) = source.close() {
            log::warn!("Failed to close live source before replay: {}", e);
        }
        log::debug!(
            "Recorder switching to replay ({} bytes, {:.3}s)",
            buffer.data().len(),
            self.params.duration_of(buffer.data().len() / frame)
        );
        self.inner = Inner::Replay(buffer);
        Ok(())
    }
}

impl<S: AudioSource> AudioSource for Recorder<S> {
    fn open(&mut self) -> Result<(), ReaderError> {
        match &mut self.inner {
            Inner::Live { source, .. } => source.open(),
            Inner::Replay(buffer) => buffer.open(),
        }
    }

    fn close(&mut self) -> Result<(), ReaderError> {
        match &mut self.inner {
            Inner::Live { source, .. } => source.close(),
            Inner::Replay(buffer) => buffer.close(),
        }
    }

    fn is_open(&self) -> bool {
        match &self.inner {
            Inner::Live { source, .. } => source.is_open(),
            Inner::Replay(buffer) => buffer.is_open(),
        }
    }

    fn read(&mut self, size: usize) -> Result<Option<Vec<u8>>, ReaderError> {
        match &mut self.inner {
            Inner::Live { source, cache } => {
                let block = source.read(size)?;
                if let Some(data) = &block {
                    cache.extend_from_slice(data);
                }
                Ok(block)
            }
            Inner::Replay(buffer) => buffer.read(size),
        }
    }

    fn rewind(&mut self) -> Result<(), ReaderError> {
        if let Inner::Replay(buffer) = &mut self.inner {
            return buffer.rewind();
        }
        self.start_replay()
    }

    fn is_rewindable(&self) -> bool {
        true
    }

    fn data(&self) -> Result<&[u8], ReaderError> {
        match &self.inner {
            Inner::Live { .. } => Err(ReaderError::illegal_state(
                "unrewound recorder: rewind must be called before accessing recorded data",
            )),
            Inner::Replay(buffer) => Ok(buffer.data()),
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(data: &[u8]) -> Recorder<BufferAudioSource> {
        let mut source = BufferAudioSource::new(data.to_vec(), StreamParams::new(16, 1, 1)).unwrap();
        source.open().unwrap();
        Recorder::new(source).unwrap()
    }

    #[test]
    fn data_before_rewind_is_illegal() {
        let mut rec = recorder(b"abcd");
        rec.read(2).unwrap();
        assert!(matches!(rec.data(), Err(ReaderError::IllegalState(_))));
    }

    #[test]
    fn rewind_replays_exactly_what_was_read() {
        let mut rec = recorder(b"abcdefgh");
        assert_eq!(rec.read(3).unwrap().unwrap(), b"abc");
        assert_eq!(rec.read(2).unwrap().unwrap(), b"de");
        assert!(rec.mode().is_live());

        rec.rewind().unwrap();
        assert!(rec.mode().is_replay());
        assert!(rec.is_open());
        assert_eq!(rec.data().unwrap(), b"abcde");
        assert_eq!(rec.read(10).unwrap().unwrap(), b"abcde");
        assert_eq!(rec.read(1).unwrap(), None);
    }

    #[test]
    fn replay_never_reads_live_source_again() {
        let mut rec = recorder(b"abcdefgh");
        rec.read(2).unwrap();
        rec.rewind().unwrap();
        rec.read(2).unwrap();
        assert_eq!(rec.read(2).unwrap(), None);

        rec.rewind().unwrap();
        assert_eq!(rec.read(4).unwrap().unwrap(), b"ab");
        assert_eq!(rec.data().unwrap(), b"ab");
    }

    #[test]
    fn end_of_stream_is_not_cached() {
        let mut rec = recorder(b"ab");
        rec.read(4).unwrap();
        assert_eq!(rec.read(4).unwrap(), None);
        rec.rewind().unwrap();
        assert_eq!(rec.data().unwrap(), b"ab");
    }

    /// Returns the queued chunks as-is, whatever size was asked for.
    struct Ragged {
        chunks: Vec<Vec<u8>>,
    }

    impl AudioSource for Ragged {
        fn open(&mut self) -> Result<(), ReaderError> {
            Ok(())
        }
        fn close(&mut self) -> Result<(), ReaderError> {
            Ok(())
        }
        fn is_open(&self) -> bool {
            true
        }
        fn read(&mut self, _size: usize) -> Result<Option<Vec<u8>>, ReaderError> {
            if self.chunks.is_empty() {
                return Ok(None);
            }
            Ok(Some(self.chunks.remove(0)))
        }
        fn sampling_rate(&self) -> u32 {
            16
        }
        fn sample_width(&self) -> u8 {
            2
        }
        fn channels(&self) -> u16 {
            1
        }
    }

    #[test]
    fn misaligned_recording_is_kept_on_failed_rewind() {
        let source = Ragged {
            chunks: vec![vec![1, 2, 3], vec![4]],
        };
        let mut rec = Recorder::new(source).unwrap();
        rec.read(2).unwrap();

        assert!(matches!(rec.rewind(), Err(ReaderError::InvalidArgument(_))));
        assert!(rec.mode().is_live());

        rec.read(2).unwrap();
        rec.rewind().unwrap();
        assert_eq!(rec.data().unwrap(), &[1u8, 2, 3, 4]);
    }

    #[test]
    fn forwards_stream_params() {
        let source = BufferAudioSource::new(Vec::new(), StreamParams::new(8000, 2, 2)).unwrap();
        let rec = Recorder::new(source).unwrap();
        assert_eq!(rec.params(), StreamParams::new(8000, 2, 2));
        assert!(rec.is_rewindable());
    }
}
