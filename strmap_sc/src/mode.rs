use std::num::NonZeroUsize;

use strmap::{hash_function_1, StrMap};

use crate::ScHashMap;

/// Returns every value tied for the highest number of occurrences in
/// `values`, each listed once, together with that number.
///
/// Modes come out in the key order of the table that collected them, not in
/// input order. An empty input has no modes and a frequency of 0, not 1:
/// no value occurs at all.
pub fn find_mode<S: AsRef<str>>(values: &[S]) -> (Vec<String>, usize) {
    let capacity = NonZeroUsize::new(values.len() / 3).unwrap_or(NonZeroUsize::MIN);

    let mut counts: ScHashMap<usize, _> = ScHashMap::new(capacity, hash_function_1);
    let mut frequency: usize = 0;
    for value in values.iter().map(AsRef::as_ref) {
        let count = counts.get(value).map_or(1, |count| count + 1);
        counts.put(value, count);
        frequency = frequency.max(count);
    }

    let mut modes = ScHashMap::new(capacity, hash_function_1);
    for value in values.iter().map(AsRef::as_ref) {
        if counts.get(value) == Some(&frequency) && !modes.contains_key(value) {
            modes.put(value, frequency);
        }
    }
    (modes.get_keys(), frequency)
}
