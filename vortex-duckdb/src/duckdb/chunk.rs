use std::any::Any;

/// The host's output batch: a fixed number of columns, each able to hold up to
/// [`capacity`](DataChunk::capacity) rows, of which [`len`](DataChunk::len) are valid.
///
/// The scan only manages cardinality. Writing values is the business of the storage engine's
/// converter, which downcasts through [`as_any_mut`](DataChunk::as_any_mut) to the concrete
/// chunk type it knows how to fill.
pub trait DataChunk: Send {
    fn column_count(&self) -> usize;

    fn capacity(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_len(&mut self, len: usize);

    /// Drop all rows, keeping the column layout.
    fn reset(&mut self);

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
