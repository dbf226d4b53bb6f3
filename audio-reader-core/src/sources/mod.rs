pub mod buffer_source;
pub mod string_source;
