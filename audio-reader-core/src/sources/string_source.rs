use crate::models::error::ReaderError;
use crate::traits::data_source::DataSource;

/// A [`DataSource`] yielding one character of a string per read.
///
/// Handy for driving a tokenizer with symbolic data in tests.
#[derive(Debug, Clone, Default)]
pub struct StringDataSource {
    data: Vec<char>,
    current: usize,
}

impl StringDataSource {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.chars().collect(),
            current: 0,
        }
    }

    /// Replace the buffer and restart from its first character.
    pub fn set_data(&mut self, data: &str) {
        self.data = data.chars().collect();
        self.current = 0;
    }
}

impl DataSource for StringDataSource {
    type Item = char;

    fn read(&mut self) -> Result<Option<char>, ReaderError> {
        let next = self.data.get(self.current).copied();
        if next.is_some() {
            self.current += 1;
        }
        Ok(next)
    }
}
