/// A growable, index-addressable backing array for a table.
pub trait Sequence<T>: Sized {
    fn empty() -> Self;
    fn append(&mut self, item: T);
    fn as_slice(&self) -> &[T];
    fn as_mut_slice(&mut self) -> &mut [T];

    fn length(&self) -> usize {
        self.as_slice().len()
    }

    // a sequence of `len` items produced by `f`
    fn filled<F: FnMut() -> T>(len: usize, mut f: F) -> Self {
        let mut seq = Self::empty();
        for _ in 0..len {
            seq.append(f());
        }
        seq
    }
}

impl<T> Sequence<T> for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn append(&mut self, item: T) {
        self.push(item);
    }

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}
