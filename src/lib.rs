//! Token-bucket rate limiting with an optional burst reserve.
//!
//! A [`TokenBucket`] refills at a fixed rate up to its capacity and admits a
//! request only when it can pay the whole cost. A [`BurstingTokenBucket`]
//! pairs two buckets so that a request the primary cannot cover may borrow
//! the shortfall from a slower-refilling reserve.
//!
//! Nothing here is thread-safe on its own. Wrap a limiter in
//! [`SharedLimiter`] when several tasks need to hit it.

pub mod bursting;
pub mod clock;
pub mod config;
pub mod error;
pub mod limiter;
pub mod runner;
pub mod shared;
pub mod token_bucket;

pub use bursting::BurstingTokenBucket;
pub use clock::{Clock, ManualClock, ScriptedClock, SystemClock};
pub use error::ConfigError;
pub use limiter::{Limiter, TokenLimiter};
pub use shared::SharedLimiter;
pub use token_bucket::{TokenBucket, TokenBucketConfig};
