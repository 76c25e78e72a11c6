// the hasher every table uses unless told otherwise
pub type HashFn = fn(&str) -> u64;

/// Sum of the key's code points. Anagrams collide.
pub fn hash_function_1(key: &str) -> u64 {
    key.chars()
        .fold(0u64, |hash, c| hash.wrapping_add(u64::from(c)))
}

/// Sum of the key's code points, each weighted by its 1-based position.
pub fn hash_function_2(key: &str) -> u64 {
    key.chars().zip(1u64..).fold(0u64, |hash, (c, i)| {
        hash.wrapping_add(i.wrapping_mul(u64::from(c)))
    })
}
