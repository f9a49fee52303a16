use rand::Rng;

/// Picks one of `len` alternatives. Injected wherever speech varies between calls.
pub trait RandomChoice: Send + Sync {
    /// `len` is never zero.
    fn choose(&self, len: usize) -> usize;
}

pub struct ThreadRandom;

impl RandomChoice for ThreadRandom {
    fn choose(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}
