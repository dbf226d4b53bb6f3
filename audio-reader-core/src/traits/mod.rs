pub mod audio_source;
pub mod data_source;
pub mod window_reader;
