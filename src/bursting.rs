use crate::limiter::{Limiter, TokenLimiter};
use tracing::debug;

/// Two limiters acting as one: a primary bucket, and a burst reserve that only
/// pays for what the primary cannot.
///
/// The reserve is used last and only for the exact shortfall. A rejected
/// request leaves both sides untouched. The commit is two calls on the
/// primary, so the composition relies on nobody else touching the parts
/// in between. Not thread-safe.
#[derive(Debug)]
pub struct BurstingTokenBucket<P, B> {
    primary: P,
    burst: B,
}

impl<P: TokenLimiter, B: TokenLimiter> BurstingTokenBucket<P, B> {
    pub fn new(primary: P, burst: B) -> Self {
        Self { primary, burst }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn burst(&self) -> &B {
        &self.burst
    }

    pub fn into_parts(self) -> (P, B) {
        (self.primary, self.burst)
    }
}

impl<P: TokenLimiter, B: TokenLimiter> Limiter for BurstingTokenBucket<P, B> {
    fn allowed(&mut self, cost: u64) -> bool {
        if self.primary.allowed(cost) {
            return true;
        }

        let remaining = self.primary.tokens();
        let shortfall = cost.saturating_sub(remaining);
        if !self.burst.allowed(shortfall) {
            return false;
        }

        // The failed attempt above left `remaining` in place, so this always succeeds.
        let _ = self.primary.allowed(remaining);
        debug!(cost, from_primary = remaining, from_burst = shortfall, "request spilled into burst reserve");
        true
    }
}

impl<P: TokenLimiter, B: TokenLimiter> TokenLimiter for BurstingTokenBucket<P, B> {
    fn tokens(&self) -> u64 {
        self.primary.tokens().saturating_add(self.burst.tokens())
    }
}
