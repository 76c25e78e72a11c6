//! String-keyed hash table using open addressing with quadratic probing.
//!
//! Removed entries leave a [`Slot::Tombstone`] behind so that keys stored
//! further along a probe sequence stay reachable. Tombstones are dropped
//! whenever the table is rebuilt by [`StrMap::resize_table`].

#![deny(clippy::disallowed_methods)]

#[cfg(feature = "debug")]
use std::collections::BTreeMap;
use std::{borrow::Cow, collections::HashSet, fmt, marker::PhantomData, mem, num::NonZeroUsize};

pub use strmap::StrMap;
use strmap::{HashFn, ResizeError, Sequence};
use tracing::{debug, trace};

#[cfg(feature = "serde")]
mod serde;

// the table grows once this fraction of its slots hold live entries
pub const MAX_LOAD: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<V> {
    pub key: String,
    pub value: V,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<V> {
    Empty,
    // still matches its key while probing, but holds no value
    Tombstone(String),
    Occupied(Entry<V>),
}

impl<V> Slot<V> {
    fn key(&self) -> Option<&str> {
        match self {
            Slot::Empty => None,
            Slot::Tombstone(key) | Slot::Occupied(Entry { key, .. }) => Some(key.as_str()),
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => write!(f, "None"),
            Slot::Tombstone(key) => write!(f, "K: {} TS", key),
            Slot::Occupied(Entry { key, value }) => write!(f, "K: {} V: {}", key, value),
        }
    }
}

// where the probe sequence for a key stopped
enum Probe {
    // a slot carrying the key, live or tombstoned
    Found(usize),
    Vacant(usize),
    // every slot the sequence can reach is taken by other keys
    Exhausted,
}

pub struct OaHashMap<V, H = HashFn, A = Vec<Slot<V>>>
where
    A: Sequence<Slot<V>>,
{
    slots: A,
    size: usize,
    hash_fn: H,
    #[cfg(feature = "debug")]
    pub probe_lengths: BTreeMap<usize, usize>,
    marker: PhantomData<V>,
}

impl<V, H> OaHashMap<V, H>
where
    H: Fn(&str) -> u64,
{
    pub fn new(capacity: NonZeroUsize, hash_fn: H) -> Self {
        OaHashMap::new_in(capacity, hash_fn)
    }
}

impl<V, H, A> OaHashMap<V, H, A>
where
    H: Fn(&str) -> u64,
    A: Sequence<Slot<V>>,
{
    /// Creates a table backed by `A` with `capacity` empty slots.
    pub fn new_in(capacity: NonZeroUsize, hash_fn: H) -> Self {
        OaHashMap {
            slots: A::filled(capacity.get(), || Slot::Empty),
            size: 0,
            hash_fn,
            #[cfg(feature = "debug")]
            probe_lengths: BTreeMap::new(),
            marker: PhantomData,
        }
    }

    // live entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots.as_slice().iter().filter_map(|slot| match slot {
            Slot::Occupied(Entry { key, value }) => Some((key.as_str(), value)),
            _ => None,
        })
    }

    pub fn slots(&self) -> &[Slot<V>] {
        self.slots.as_slice()
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.probe(key).0 {
            Probe::Found(index) => match &mut self.slots.as_mut_slice()[index] {
                Slot::Occupied(entry) => Some(&mut entry.value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    // Walks the quadratic probe sequence for `key`: hash(key) mod capacity,
    // then offsets 1, 4, 9, ... from there. Offsets repeat with period
    // capacity, so no more than capacity slots are examined.
    fn probe(&self, key: &str) -> (Probe, usize) {
        let slots = self.slots.as_slice();
        let capacity = slots.len();
        let start = ((self.hash_fn)(key) % capacity as u64) as usize;
        let (mut index, mut offset) = (start, 0);
        for probes in 0..capacity {
            match slots[index].key() {
                None => return (Probe::Vacant(index), probes),
                Some(k) if k == key => return (Probe::Found(index), probes),
                Some(_) => {
                    // (p + 1)^2 = p^2 + 2p + 1
                    offset = (offset + 2 * probes + 1) % capacity;
                    index = (start + offset) % capacity;
                }
            }
        }
        (Probe::Exhausted, capacity)
    }

    #[inline]
    fn record_probe(&mut self, _probes: usize) {
        #[cfg(feature = "debug")]
        {
            *self.probe_lengths.entry(_probes).or_insert(0) += 1;
        }
    }

    fn grow(&mut self) {
        let new_capacity = self
            .capacity()
            .checked_mul(2)
            .expect("multiplication by 2 overflows a usize");
        trace!(load = self.table_load(), new_capacity, "growing open addressing table");
        self.resize_table(new_capacity);
    }

    fn has_tombstones(&self) -> bool {
        self.slots
            .as_slice()
            .iter()
            .any(|slot| matches!(slot, Slot::Tombstone(_)))
    }

    // drops tombstones without changing capacity
    fn rebuild(&mut self) {
        trace!(capacity = self.capacity(), size = self.size, "clearing tombstones");
        self.resize_table(self.capacity());
    }

    /// Stores `value` under `key`, growing the table as needed.
    ///
    /// Capacity doubles before the insert if the table is already at
    /// [`MAX_LOAD`], and again after a new key brings it there, so the load
    /// is below [`MAX_LOAD`] when this returns. When the probe sequence for
    /// `key` runs out of slots, tombstones are cleared first; the table only
    /// doubles if there were none.
    fn insert(&mut self, key: Cow<'_, str>, value: V) {
        if self.table_load() >= MAX_LOAD {
            self.grow();
        }
        loop {
            let (probe, probes) = self.probe(&key);
            self.record_probe(probes);
            let index = match probe {
                Probe::Found(index) | Probe::Vacant(index) => index,
                Probe::Exhausted if self.has_tombstones() => {
                    self.rebuild();
                    continue;
                }
                Probe::Exhausted => {
                    self.grow();
                    continue;
                }
            };
            let slot = &mut self.slots.as_mut_slice()[index];
            if let Slot::Occupied(entry) = slot {
                entry.value = value;
                return;
            }
            // empty, or a tombstone left by this same key
            *slot = Slot::Occupied(Entry {
                key: key.into_owned(),
                value,
            });
            self.size += 1;
            if self.table_load() >= MAX_LOAD {
                self.grow();
            }
            return;
        }
    }
}

impl<V, H, A> StrMap<V> for OaHashMap<V, H, A>
where
    H: Fn(&str) -> u64,
    A: Sequence<Slot<V>>,
{
    fn invariants(&self) -> bool {
        let slots = self.slots.as_slice();
        let mut keys = HashSet::new();
        let live = slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied(entry) => Some((index, entry.key.as_str())),
                _ => None,
            })
            .all(|(index, key)| {
                keys.insert(key) && matches!(self.probe(key).0, Probe::Found(i) if i == index)
            });
        !slots.is_empty() && live && keys.len() == self.size && self.size <= slots.len()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.slots.length()
    }

    fn put(&mut self, key: &str, value: V) {
        self.insert(Cow::Borrowed(key), value);
    }

    fn get(&self, key: &str) -> Option<&V> {
        match self.probe(key).0 {
            Probe::Found(index) => match &self.slots.as_slice()[index] {
                Slot::Occupied(entry) => Some(&entry.value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let index = match self.probe(key).0 {
            Probe::Found(index) => index,
            Probe::Vacant(_) | Probe::Exhausted => return None,
        };
        let slot = &mut self.slots.as_mut_slice()[index];
        match mem::take(slot) {
            Slot::Occupied(Entry { key, value }) => {
                *slot = Slot::Tombstone(key);
                self.size -= 1;
                Some(value)
            }
            tombstone => {
                *slot = tombstone;
                None
            }
        }
    }

    fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        if new_capacity == 0 {
            trace!("rejected resize to capacity 0");
            return Err(ResizeError::ZeroCapacity);
        }
        if new_capacity < self.size {
            trace!(new_capacity, size = self.size, "rejected resize below size");
            return Err(ResizeError::BelowSize {
                requested: new_capacity,
                size: self.size,
            });
        }
        debug!(
            from = self.capacity(),
            to = new_capacity,
            size = self.size,
            "resizing open addressing table"
        );
        let mut old = mem::replace(&mut self.slots, A::filled(new_capacity, || Slot::Empty));
        self.size = 0;
        for slot in old.as_mut_slice() {
            if let Slot::Occupied(Entry { key, value }) = mem::take(slot) {
                self.insert(Cow::Owned(key), value);
            }
        }
        Ok(())
    }

    fn empty_buckets(&self) -> usize {
        self.slots
            .as_slice()
            .iter()
            .filter(|slot| !slot.is_occupied())
            .count()
    }

    fn clear(&mut self) {
        self.slots.as_mut_slice().fill_with(|| Slot::Empty);
        self.size = 0;
    }

    fn get_keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }
}

impl<V: fmt::Display, H, A: Sequence<Slot<V>>> fmt::Display for OaHashMap<V, H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.as_slice().iter().enumerate() {
            writeln!(f, "{}: {}", index, slot)?;
        }
        Ok(())
    }
}

impl<V: fmt::Debug, H, A: Sequence<Slot<V>>> fmt::Debug for OaHashMap<V, H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.as_slice().iter().filter_map(|slot| match slot {
                Slot::Occupied(Entry { key, value }) => Some((key, value)),
                _ => None,
            }))
            .finish()
    }
}
