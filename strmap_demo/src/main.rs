use std::{
    io::{self, Write},
    num::NonZeroUsize,
};

use anyhow::Context;
use itertools::Itertools;
use strmap::{hash_function_1, hash_function_2, StrMap};
use strmap_oa::OaHashMap;
use strmap_sc::{find_mode, ScHashMap};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn capacity(n: usize) -> anyhow::Result<NonZeroUsize> {
    NonZeroUsize::new(n).context("capacity must be nonzero")
}

fn heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}\n{}", title, "-".repeat(title.len()))
}

// Walks a table through puts, a resize sweep and a clear.
fn exercise<M: StrMap<usize>>(out: &mut impl Write, name: &str, mut m: M) -> anyhow::Result<()> {
    heading(out, &format!("{}: put", name))?;
    for i in 0..150 {
        m.put(&format!("str{}", i), i * 100);
        if i % 25 == 24 {
            writeln!(
                out,
                "{} {:.2} {} {}",
                m.empty_buckets(),
                m.table_load(),
                m.size(),
                m.capacity()
            )?;
        }
    }

    heading(out, &format!("{}: resize", name))?;
    for new_capacity in (111..1000).step_by(117) {
        m.resize_table(new_capacity);
        let intact = (0..150).all(|i| m.get(&format!("str{}", i)) == Some(&(i * 100)));
        writeln!(
            out,
            "{} {} {} {} {:.2}",
            new_capacity,
            intact,
            m.size(),
            m.capacity(),
            m.table_load()
        )?;
    }

    heading(out, &format!("{}: remove", name))?;
    for i in (0..150).step_by(3) {
        m.remove(&format!("str{}", i));
    }
    writeln!(out, "{} {}", m.size(), m.contains_key("str3"))?;

    heading(out, &format!("{}: clear", name))?;
    m.clear();
    writeln!(out, "{} {}", m.size(), m.capacity())?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    exercise(&mut out, "open addressing", OaHashMap::new(capacity(53)?, hash_function_1))?;
    exercise(&mut out, "chaining", ScHashMap::new(capacity(53)?, hash_function_2))?;

    heading(&mut out, "open addressing: slots")?;
    let mut m = OaHashMap::new(capacity(7)?, hash_function_1);
    for key in ["abc", "bca", "cab"] {
        m.put(key, key.len());
    }
    m.remove("bca");
    write!(out, "{}", m)?;

    heading(&mut out, "chaining: buckets")?;
    let mut m = ScHashMap::new(capacity(3)?, hash_function_1);
    for key in ["key1", "key2", "key3", "key4", "key5"] {
        m.put(key, key.len());
    }
    write!(out, "{}", m)?;

    heading(&mut out, "find_mode")?;
    let cases: [&[&str]; 4] = [
        &["apple", "apple", "grape", "melon", "peach"],
        &["one", "two", "three", "four", "five"],
        &["2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2"],
        &[
            "Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu",
            "Ubuntu",
        ],
    ];
    for case in cases {
        let (modes, frequency) = find_mode(case);
        info!(len = case.len(), frequency, "found mode");
        writeln!(
            out,
            "Input: {:?}\nMode: {}, Frequency: {}\n",
            case,
            modes.iter().join(", "),
            frequency
        )?;
    }
    Ok(())
}
