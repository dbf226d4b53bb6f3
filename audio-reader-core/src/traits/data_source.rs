use crate::models::error::ReaderError;

/// A source of items for a tokenizer: one item per `read`, `None` when done.
pub trait DataSource {
    type Item;

    fn read(&mut self) -> Result<Option<Self::Item>, ReaderError>;
}

/// Decides whether one item read from a [`DataSource`] counts as activity.
pub trait DataValidator<T: ?Sized> {
    fn is_valid(&self, data: &T) -> bool;
}
