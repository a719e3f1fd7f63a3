use rand::Rng;

/// Source of randomness for the game engines.
///
/// Production code wraps a `rand` generator in [`RngSource`]; tests replay
/// fixed indices with [`SequenceSource`] so rounds are fully predictable.
pub trait RandomSource {
    /// Returns an index in `0..upper`. Callers never pass `upper == 0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }
}

/// Adapter from any `rand::Rng` to [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl RngSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self { rng: rand::rng() }
    }
}

impl RngSource<rand::rngs::StdRng> {
    /// OS-seeded generator. Unlike the thread-local one it is `Send`, so it
    /// can be held across an `.await`.
    pub fn from_os() -> Self {
        Self {
            rng: <rand::rngs::StdRng as rand::SeedableRng>::from_os_rng(),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Deterministic source that cycles through a fixed list of indices.
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns zero
    pub fn zeros() -> Self {
        Self::default()
    }
}

impl RandomSource for SequenceSource {
    fn next_index(&mut self, upper: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper
    }
}

/// Pick one element
pub fn choose<'a, T>(items: &'a [T], rng: &mut impl RandomSource) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_index(items.len()))
}

/// In-place Fisher-Yates shuffle
pub fn shuffle<T>(items: &mut [T], rng: &mut impl RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}
