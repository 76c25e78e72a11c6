//! String-keyed hash table using separate chaining, and [`find_mode`].

#![deny(clippy::disallowed_methods)]

use std::{borrow::Cow, collections::HashSet, fmt, marker::PhantomData, mem, num::NonZeroUsize};

pub use strmap::StrMap;
use strmap::{HashFn, ResizeError, Sequence};
use tracing::{debug, trace};

mod chain;
mod mode;
#[cfg(feature = "serde")]
mod serde;

pub use chain::{Chain, Node};
pub use mode::find_mode;

// Never grows on its own: chains absorb any load factor.
pub struct ScHashMap<V, H = HashFn, A = Vec<Chain<V>>>
where
    A: Sequence<Chain<V>>,
{
    buckets: A,
    size: usize,
    hash_fn: H,
    marker: PhantomData<V>,
}

impl<V, H> ScHashMap<V, H>
where
    H: Fn(&str) -> u64,
{
    pub fn new(capacity: NonZeroUsize, hash_fn: H) -> Self {
        ScHashMap::new_in(capacity, hash_fn)
    }
}

impl<V, H, A> ScHashMap<V, H, A>
where
    H: Fn(&str) -> u64,
    A: Sequence<Chain<V>>,
{
    pub fn new_in(capacity: NonZeroUsize, hash_fn: H) -> Self {
        ScHashMap {
            buckets: A::filled(capacity.get(), Chain::new),
            size: 0,
            hash_fn,
            marker: PhantomData,
        }
    }

    // bucket order, then chain order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets
            .as_slice()
            .iter()
            .flat_map(|chain| chain.iter().map(|node| (node.key.as_str(), &node.value)))
    }

    pub fn buckets(&self) -> &[Chain<V>] {
        self.buckets.as_slice()
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.index(key);
        self.buckets.as_mut_slice()[index]
            .contains_mut(key)
            .map(|node| &mut node.value)
    }

    fn index(&self, key: &str) -> usize {
        ((self.hash_fn)(key) % self.buckets.length() as u64) as usize
    }

    fn insert(&mut self, key: Cow<'_, str>, value: V) {
        let index = self.index(&key);
        let chain = &mut self.buckets.as_mut_slice()[index];
        match chain.remove(&key) {
            // re-linked at the tail with the new value
            Some(node) => chain.insert(node.key, value),
            None => {
                chain.insert(key.into_owned(), value);
                self.size += 1;
            }
        }
    }
}

impl<V, H, A> StrMap<V> for ScHashMap<V, H, A>
where
    H: Fn(&str) -> u64,
    A: Sequence<Chain<V>>,
{
    fn invariants(&self) -> bool {
        let buckets = self.buckets.as_slice();
        let mut keys = HashSet::new();
        let placed = buckets.iter().enumerate().all(|(index, chain)| {
            chain
                .iter()
                .all(|node| keys.insert(node.key.as_str()) && self.index(&node.key) == index)
        });
        !buckets.is_empty() && placed && keys.len() == self.size
    }

    fn size(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.buckets.length()
    }

    fn put(&mut self, key: &str, value: V) {
        self.insert(Cow::Borrowed(key), value);
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.buckets.as_slice()[self.index(key)]
            .contains(key)
            .map(|node| &node.value)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.buckets.as_slice()[self.index(key)]
            .contains(key)
            .is_some()
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.index(key);
        let node = self.buckets.as_mut_slice()[index].remove(key)?;
        self.size -= 1;
        Some(node.value)
    }

    fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        if new_capacity == 0 {
            trace!("rejected resize to capacity 0");
            return Err(ResizeError::ZeroCapacity);
        }
        debug!(
            from = self.capacity(),
            to = new_capacity,
            size = self.size,
            "resizing chaining table"
        );
        let mut old = mem::replace(&mut self.buckets, A::filled(new_capacity, Chain::new));
        self.size = 0;
        for chain in old.as_mut_slice() {
            for node in mem::take(chain) {
                self.insert(Cow::Owned(node.key), node.value);
            }
        }
        Ok(())
    }

    fn empty_buckets(&self) -> usize {
        self.buckets
            .as_slice()
            .iter()
            .filter(|chain| chain.is_empty())
            .count()
    }

    fn clear(&mut self) {
        self.buckets.as_mut_slice().fill_with(Chain::new);
        self.size = 0;
    }

    fn get_keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }
}

impl<V: fmt::Display, H, A: Sequence<Chain<V>>> fmt::Display for ScHashMap<V, H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.as_slice().iter().enumerate() {
            writeln!(f, "{}: {}", index, chain)?;
        }
        Ok(())
    }
}

impl<V: fmt::Debug, H, A: Sequence<Chain<V>>> fmt::Debug for ScHashMap<V, H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.buckets
                    .as_slice()
                    .iter()
                    .flat_map(|chain| chain.iter().map(|node| (&node.key, &node.value))),
            )
            .finish()
    }
}
