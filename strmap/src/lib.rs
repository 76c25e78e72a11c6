#![deny(clippy::disallowed_methods)]

use thiserror::Error;

#[cfg(feature = "arbitrary")]
pub mod arbitrary;
mod hash;
#[cfg(feature = "proptest")]
pub mod proptest;
pub mod script;
mod sequence;
#[cfg(test)]
mod tests;

pub use hash::{hash_function_1, hash_function_2, HashFn};
pub use sequence::Sequence;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResizeError {
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    #[error("capacity {requested} cannot hold {size} entries")]
    BelowSize { requested: usize, size: usize },
}

/// A mapping from string keys to values of type `V`.
///
/// None of the operations fail: lookups of missing keys return `None`/`false`,
/// removals of missing keys and invalid resizes leave the table unchanged.
pub trait StrMap<V>: Sized {
    fn invariants(&self) -> bool;
    // number of live keys
    fn size(&self) -> usize;
    // number of buckets, always at least 1
    fn capacity(&self) -> usize;
    fn put(&mut self, key: &str, value: V);
    fn get(&self, key: &str) -> Option<&V>;
    fn contains_key(&self, key: &str) -> bool;
    fn remove(&mut self, key: &str) -> Option<V>;
    fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError>;
    fn empty_buckets(&self) -> usize;
    fn clear(&mut self);
    fn get_keys(&self) -> Vec<String>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn table_load(&self) -> f64 {
        self.size() as f64 / self.capacity() as f64
    }

    /// Rebuilds the table with `new_capacity` buckets, or does nothing if
    /// the table can't be resized to that capacity.
    ///
    /// Tables that grow on their own may end up larger than `new_capacity`
    /// when re-inserting the entries pushes them over their load limit.
    fn resize_table(&mut self, new_capacity: usize) {
        let _ = self.try_resize_table(new_capacity);
    }
}
