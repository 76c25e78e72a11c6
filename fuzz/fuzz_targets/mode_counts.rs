#![no_main]
use std::collections::BTreeMap;

use libfuzzer_sys::fuzz_target;
use strmap_sc::find_mode;

fuzz_target!(|values: Vec<String>| {
    let mut counts = BTreeMap::new();
    for value in &values {
        *counts.entry(value.as_str()).or_insert(0usize) += 1;
    }
    let max = counts.values().copied().max().unwrap_or(0);

    let (mut modes, frequency) = find_mode(&values);
    modes.sort_unstable();
    let expected: Vec<_> = counts
        .into_iter()
        .filter(|&(_, count)| count == max)
        .map(|(value, _)| value.to_string())
        .collect();
    assert_eq!(frequency, max);
    assert_eq!(modes, expected);
});
