use std::fmt::Debug;

use proptest::{prelude::*, test_runner::TestCaseError};

use crate::{
    script::{run_script, Op},
    StrMap,
};

const MAX_OPS: usize = 64;
const MAX_CAPACITY: usize = 40;

// few distinct keys so that collisions, overwrites and removals are common
pub fn arb_key() -> impl Strategy<Value = String> {
    "[a-f]{1,3}"
}

pub fn arb_op<V: Arbitrary + Clone>() -> impl Strategy<Value = Op<V>> {
    prop_oneof![
        6 => (arb_key(), any::<V>()).prop_map(|(key, value)| Op::Put(key, value)),
        2 => arb_key().prop_map(Op::Get),
        3 => arb_key().prop_map(Op::Remove),
        1 => (0..MAX_CAPACITY).prop_map(Op::Resize),
        1 => Just(Op::Clear),
    ]
}

pub fn arb_script<V: Arbitrary + Clone>() -> impl Strategy<Value = Vec<Op<V>>> {
    proptest::collection::vec(arb_op(), 0..MAX_OPS)
}

pub fn check_script<V, M>(mut map: M, script: Vec<Op<V>>) -> Result<(), TestCaseError>
where
    V: Clone + PartialEq + Debug,
    M: StrMap<V>,
{
    run_script(&mut map, script)
        .map(|_| ())
        .map_err(|e| TestCaseError::fail(e.to_string()))
}
