use arbitrary::{Arbitrary, Unstructured};

use crate::script::Op;

const KEYS: u8 = 16;
const MAX_OPS: usize = 256;
const MAX_CAPACITY: usize = 64;

pub fn arb_key(u: &mut Unstructured<'_>) -> arbitrary::Result<String> {
    Ok(format!("key{}", u.int_in_range(0..=KEYS - 1)?))
}

pub fn arb_op<'a, V: Arbitrary<'a>>(u: &mut Unstructured<'a>) -> arbitrary::Result<Op<V>> {
    Ok(match u.int_in_range(0..=12u8)? {
        0..=5 => Op::Put(arb_key(u)?, u.arbitrary()?),
        6..=7 => Op::Get(arb_key(u)?),
        8..=10 => Op::Remove(arb_key(u)?),
        11 => Op::Resize(u.int_in_range(0..=MAX_CAPACITY)?),
        _ => Op::Clear,
    })
}

pub fn arb_script<'a, V: Arbitrary<'a>>(
    u: &mut Unstructured<'a>,
) -> arbitrary::Result<Vec<Op<V>>> {
    let mut script = Vec::new();
    for _ in 0..u.int_in_range(0..=MAX_OPS)? {
        script.push(arb_op(u)?);
    }
    Ok(script)
}
