use std::collections::BTreeMap;

use arbitrary::Unstructured;
use proptest::test_runner::TestRunner;

use crate::{
    hash_function_1, hash_function_2,
    proptest::{arb_script, check_script},
    script::{run_script, Op},
    ResizeError, Sequence, StrMap,
};

// a dumb map to exercise the script machinery against
struct Naive {
    entries: BTreeMap<String, i32>,
    capacity: usize,
}

impl Naive {
    fn new() -> Self {
        Naive {
            entries: BTreeMap::new(),
            capacity: 1,
        }
    }
}

impl StrMap<i32> for Naive {
    fn invariants(&self) -> bool {
        self.capacity >= 1
    }

    fn size(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn put(&mut self, key: &str, value: i32) {
        self.entries.insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<&i32> {
        self.entries.get(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn remove(&mut self, key: &str) -> Option<i32> {
        self.entries.remove(key)
    }

    fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        if new_capacity == 0 {
            return Err(ResizeError::ZeroCapacity);
        }
        self.capacity = new_capacity;
        Ok(())
    }

    fn empty_buckets(&self) -> usize {
        0
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn get_keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

// a map that forgets every other insert
struct Lossy(Naive, bool);

impl StrMap<i32> for Lossy {
    fn invariants(&self) -> bool {
        self.0.invariants()
    }
    fn size(&self) -> usize {
        self.0.size()
    }
    fn capacity(&self) -> usize {
        self.0.capacity()
    }
    fn put(&mut self, key: &str, value: i32) {
        self.1 = !self.1;
        if self.1 {
            self.0.put(key, value);
        }
    }
    fn get(&self, key: &str) -> Option<&i32> {
        self.0.get(key)
    }
    fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
    fn remove(&mut self, key: &str) -> Option<i32> {
        self.0.remove(key)
    }
    fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        self.0.try_resize_table(new_capacity)
    }
    fn empty_buckets(&self) -> usize {
        self.0.empty_buckets()
    }
    fn clear(&mut self) {
        self.0.clear()
    }
    fn get_keys(&self) -> Vec<String> {
        self.0.get_keys()
    }
}

#[test]
fn hash_function_1_sums_code_points() {
    assert_eq!(hash_function_1(""), 0);
    assert_eq!(hash_function_1("key1"), 107 + 101 + 121 + 49);
    assert_eq!(hash_function_1("ab"), hash_function_1("ba"));
}

#[test]
fn hash_function_2_weights_by_position() {
    assert_eq!(hash_function_2(""), 0);
    assert_eq!(hash_function_2("key1"), 107 + 2 * 101 + 3 * 121 + 4 * 49);
    assert_ne!(hash_function_2("ab"), hash_function_2("ba"));
}

#[test]
fn filled_sequence() {
    let seq: Vec<Option<u8>> = Sequence::filled(5, || None);
    assert_eq!(seq.length(), 5);
    assert!(seq.iter().all(Option::is_none));

    let mut n = 0;
    let seq: Vec<i32> = Sequence::filled(3, || {
        n += 1;
        n
    });
    assert_eq!(Sequence::as_slice(&seq), &[1, 2, 3]);
}

#[test]
fn resize_error_messages() {
    assert_eq!(
        ResizeError::ZeroCapacity.to_string(),
        "capacity must be at least 1"
    );
    assert_eq!(
        ResizeError::BelowSize {
            requested: 2,
            size: 5
        }
        .to_string(),
        "capacity 2 cannot hold 5 entries"
    );
}

#[test]
fn default_resize_table_ignores_errors() {
    let mut map = Naive::new();
    map.resize_table(0);
    assert_eq!(map.capacity(), 1);
    map.resize_table(7);
    assert_eq!(map.capacity(), 7);
}

#[test]
fn table_load_is_size_over_capacity() {
    let mut map = Naive::new();
    map.resize_table(4);
    assert_eq!(map.table_load(), 0.0);
    map.put("a", 1);
    assert_eq!(map.table_load(), 0.25);
    assert!(!map.is_empty());
}

#[test]
fn script_detects_divergence() {
    let script = vec![
        Op::Put("a".to_string(), 1),
        Op::Put("b".to_string(), 2),
        Op::Get("a".to_string()),
    ];
    assert!(run_script(&mut Naive::new(), script.clone()).is_ok());
    let err = run_script(&mut Lossy(Naive::new(), false), script).unwrap_err();
    assert_eq!(err.step, 1);
}

#[test]
fn naive_map_passes_scripts() {
    let mut runner = TestRunner::default();
    runner
        .run(&arb_script::<i32>(), |script| {
            check_script(Naive::new(), script)
        })
        .unwrap();
}

#[test]
fn arbitrary_scripts_replay() {
    let bytes: Vec<u8> = (0..=255u8).cycle().take(2048).collect();
    let mut u = Unstructured::new(&bytes);
    let script = crate::arbitrary::arb_script::<i32>(&mut u).unwrap();
    let model = run_script(&mut Naive::new(), script.clone()).unwrap();
    let puts = script
        .iter()
        .filter(|op| matches!(op, Op::Put(..)))
        .count();
    assert!(model.len() <= puts);
}
