#![no_main]
use std::num::NonZeroUsize;

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;
use strmap::{arbitrary::arb_script, hash_function_1, hash_function_2, script::run_script};
use strmap_sc::ScHashMap;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let (Ok(capacity), Ok(second), Ok(script)) = (
        u.int_in_range(1..=64usize),
        u.arbitrary::<bool>(),
        arb_script::<i8>(&mut u),
    ) else {
        return;
    };
    let hash_fn = if second { hash_function_2 } else { hash_function_1 };
    let mut m = ScHashMap::new(NonZeroUsize::new(capacity).unwrap(), hash_fn);
    if let Err(e) = run_script(&mut m, script) {
        panic!("{}", e);
    }
});
