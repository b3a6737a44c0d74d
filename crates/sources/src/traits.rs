//! Core trait for randomness sources.

/// A stream of uniform samples in `[0, 1)`.
///
/// ## Design Note
/// The shuffle only ever asks for "the next number", so anything from a
/// reproducible seeded generator to the OS-backed RNG can drive it.
pub trait RandomSource {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    /// Next sample in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..bound`
    ///
    /// `bound` must be non-zero.
    fn next_index(&mut self, bound: usize) -> usize {
        let index = (self.next_f64() * bound as f64) as usize;
        // Guards against a sample that rounds up to exactly 1.0
        index.min(bound - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}
