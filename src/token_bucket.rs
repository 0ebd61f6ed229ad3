use crate::clock::{Clock, SystemClock};
use crate::error::ConfigError;
use crate::limiter::{Limiter, TokenLimiter};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::trace;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenBucketConfig {
    /// Most tokens the bucket refills up to.
    #[serde(default)]
    pub capacity: u64,
    /// Tokens added per elapsed second. Tokens land whole, but the rate may be
    /// fractional or larger than one.
    #[serde(default)]
    pub refill_rate_per_second: f64,
    /// Balance at construction. May exceed `capacity`.
    #[serde(default)]
    pub initial_tokens: u64,
}

impl TokenBucketConfig {
    pub fn new(capacity: u64, refill_rate_per_second: f64, initial_tokens: u64) -> Self {
        Self { capacity, refill_rate_per_second, initial_tokens }
    }

    /// A bucket that starts full.
    pub fn full(capacity: u64, refill_rate_per_second: f64) -> Self {
        Self::new(capacity, refill_rate_per_second, capacity)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.refill_rate_per_second;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::InvalidRefillRate { rate });
        }
        Ok(())
    }
}

/// Token bucket with whole-token accounting and fractional carry.
///
/// Refill happens lazily inside [`Limiter::allowed`]. Sub-token progress is
/// kept in `remainder` and `last_update` only moves when at least one whole
/// token was produced, so many short gaps add up instead of being truncated
/// away. Not thread-safe.
#[derive(Debug)]
pub struct TokenBucket<C = SystemClock> {
    config: TokenBucketConfig,
    available: u64,
    remainder: f64,
    last_update: Instant,
    clock: C,
}

impl TokenBucket<SystemClock> {
    pub fn new(config: TokenBucketConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TokenBucket<C> {
    pub fn with_clock(config: TokenBucketConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let last_update = clock.now();
        Ok(Self {
            config,
            available: config.initial_tokens,
            remainder: 0.0,
            last_update,
            clock,
        })
    }

    pub fn config(&self) -> &TokenBucketConfig {
        &self.config
    }

    pub fn capacity(&self) -> u64 {
        self.config.capacity
    }

    pub fn refill_rate_per_second(&self) -> f64 {
        self.config.refill_rate_per_second
    }

    /// Overwrite the balance. Going above capacity pauses refill until the
    /// balance has been spent back down to capacity.
    pub fn set_tokens(&mut self, tokens: u64) {
        self.available = tokens;
    }

    fn replenish(&mut self) {
        let now = self.clock.now();

        // Over-filled buckets keep their extra tokens but do not refill.
        if self.available > self.config.capacity {
            return;
        }

        let elapsed = now.saturating_duration_since(self.last_update).as_secs_f64();
        let amount = self.config.refill_rate_per_second * elapsed + self.remainder;
        let whole = amount.floor();
        if whole < 1.0 {
            // keep last_update so the fraction keeps growing
            return;
        }

        self.remainder = amount - whole;
        let room = self.config.capacity - self.available;
        let added = (whole as u64).min(room);
        self.available += added;
        self.last_update = now;
        trace!(added, available = self.available, remainder = self.remainder, "refilled token bucket");
    }
}

impl<C: Clock> Limiter for TokenBucket<C> {
    fn allowed(&mut self, cost: u64) -> bool {
        self.replenish();
        if self.available < cost {
            trace!(cost, available = self.available, "token bucket rejected request");
            return false;
        }
        self.available -= cost;
        true
    }
}

impl<C: Clock> TokenLimiter for TokenBucket<C> {
    fn tokens(&self) -> u64 {
        self.available
    }
}
