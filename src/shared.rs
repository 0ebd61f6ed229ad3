use crate::limiter::{Limiter, TokenLimiter};
use parking_lot::Mutex;

/// Serializes every call to the wrapped limiter behind one lock, for callers
/// that share a limiter across threads or tasks.
///
/// A bursting bucket's whole admission runs under a single lock acquisition,
/// so its commit on the primary cannot interleave with another request.
#[derive(Debug)]
pub struct SharedLimiter<L> {
    inner: Mutex<L>,
}

impl<L: Limiter> SharedLimiter<L> {
    pub fn new(limiter: L) -> Self {
        Self { inner: Mutex::new(limiter) }
    }

    pub fn allowed(&self, cost: u64) -> bool {
        self.inner.lock().allowed(cost)
    }

    /// Run `f` with exclusive access to the limiter.
    pub fn with<R>(&self, f: impl FnOnce(&mut L) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn into_inner(self) -> L {
        self.inner.into_inner()
    }
}

impl<L: TokenLimiter> SharedLimiter<L> {
    pub fn tokens(&self) -> u64 {
        self.inner.lock().tokens()
    }
}
