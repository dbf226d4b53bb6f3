pub mod audio_reader;
pub mod fixed_window;
pub mod limiter;
pub mod overlap;
pub mod recorder;
