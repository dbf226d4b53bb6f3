pub mod channel_selector;
pub mod duration_format;
pub mod energy_validator;
pub mod signal;
