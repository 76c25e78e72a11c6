//! Operation scripts and a reference model to replay them against.
//!
//! A script is a list of [`Op`]s. Replaying it on a table and on a
//! [`Model`] side by side catches any point where the table stops behaving
//! like a plain ordered map.

use std::{collections::BTreeMap, fmt::Debug};

use thiserror::Error;

use crate::StrMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op<V> {
    Put(String, V),
    Get(String),
    Remove(String),
    Resize(usize),
    Clear,
}

// the live key/value pairs a table should hold
pub type Model<V> = BTreeMap<String, V>;

#[derive(Debug, Error)]
#[error("table diverged from its model at step {step} ({op})")]
pub struct Divergence {
    pub step: usize,
    pub op: String,
}

/// Applies `op` to both `map` and `model`, returning whether the table
/// answered the way the model did.
pub fn apply<V, M>(map: &mut M, model: &mut Model<V>, op: Op<V>) -> bool
where
    V: Clone + PartialEq,
    M: StrMap<V>,
{
    match op {
        Op::Put(key, value) => {
            map.put(&key, value.clone());
            model.insert(key, value);
            true
        }
        Op::Get(key) => {
            map.get(&key) == model.get(&key) && map.contains_key(&key) == model.contains_key(&key)
        }
        Op::Remove(key) => map.remove(&key) == model.remove(&key),
        Op::Resize(new_capacity) => {
            let capacity = map.capacity();
            // a rejected resize must leave the table alone
            map.try_resize_table(new_capacity).is_ok() || map.capacity() == capacity
        }
        Op::Clear => {
            let capacity = map.capacity();
            map.clear();
            model.clear();
            map.capacity() == capacity
        }
    }
}

pub fn agrees<V, M>(map: &M, model: &Model<V>) -> bool
where
    V: PartialEq,
    M: StrMap<V>,
{
    let mut keys = map.get_keys();
    keys.sort_unstable();
    map.invariants()
        && map.size() == model.len()
        && model.iter().all(|(key, value)| map.get(key) == Some(value))
        && keys.iter().eq(model.keys())
}

pub fn run_script<V, M>(map: &mut M, script: Vec<Op<V>>) -> Result<Model<V>, Divergence>
where
    V: Clone + PartialEq + Debug,
    M: StrMap<V>,
{
    let mut model = Model::new();
    if !agrees(map, &model) {
        // tables handed to a script start out empty
        return Err(Divergence {
            step: 0,
            op: String::from("<start>"),
        });
    }
    for (step, op) in script.into_iter().enumerate() {
        let desc = format!("{:?}", op);
        if !(apply(map, &mut model, op) && agrees(map, &model)) {
            return Err(Divergence { step, op: desc });
        }
    }
    Ok(model)
}
