//! # audio-reader-core
//!
//! Streaming audio reader pipeline.
//!
//! Turns raw interleaved PCM from any [`AudioSource`] into a sequence of
//! fixed-duration, optionally overlapping windows. Optional layers record
//! everything read (so the stream can be rewound and replayed) and cap the
//! total duration read. The energy validator scores each window so a
//! tokenizer can tell activity from silence.
//!
//! ## Architecture
//!
//! ```text
//! audio-reader-core (this crate)
//! ├── traits/       ← AudioSource, WindowReader, DataSource, DataValidator
//! ├── models/       ← ReaderError, StreamParams, ChannelSelection, configurations, state
//! ├── sources/      ← BufferAudioSource, StringDataSource
//! ├── reader/       ← Recorder, Limiter, FixedSizeReader, OverlapReader, AudioReader
//! └── processing/   ← sample decoding, channel selection, energy, duration formatting
//! ```
//!
//! Layers always stack in the same order:
//!
//! ```text
//! source → Recorder → Limiter → FixedSizeReader | OverlapReader
//! ```

pub mod models;
pub mod processing;
pub mod reader;
pub mod sources;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio_models::{ChannelSelection, StreamParams};
pub use models::config::{ReaderConfiguration, ValidatorConfiguration};
pub use models::error::ReaderError;
pub use models::state::{RecordingMode, WindowState};
pub use processing::channel_selector::{make_channel_selector, ChannelSelector, ChannelView};
pub use processing::duration_format::DurationFormatter;
pub use processing::energy_validator::AudioEnergyValidator;
pub use reader::audio_reader::AudioReader;
pub use reader::fixed_window::FixedSizeReader;
pub use reader::limiter::Limiter;
pub use reader::overlap::OverlapReader;
pub use reader::recorder::Recorder;
pub use sources::buffer_source::BufferAudioSource;
pub use sources::string_source::StringDataSource;
pub use traits::audio_source::AudioSource;
pub use traits::data_source::{DataSource, DataValidator};
pub use traits::window_reader::WindowReader;
