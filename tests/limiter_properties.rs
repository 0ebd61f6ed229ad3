use burst_rate_limit::{
    BurstingTokenBucket, Limiter, ManualClock, ScriptedClock, TokenBucket, TokenBucketConfig, TokenLimiter,
};
use std::time::{Duration, Instant};

fn manual_bucket(clock: &ManualClock, capacity: u64, rate: f64, initial: u64) -> TokenBucket<ManualClock> {
    TokenBucket::with_clock(TokenBucketConfig::new(capacity, rate, initial), clock.clone()).unwrap()
}

#[test]
fn balance_never_exceeds_capacity() {
    let clock = ManualClock::default();
    let mut bucket = manual_bucket(&clock, 7, 3.5, 2);
    let gaps = [0u64, 13, 400, 2_000, 90, 1, 5_000, 333, 10_000, 7];
    let costs = [1u64, 0, 3, 9, 2, 1, 7, 4, 0, 5];
    for round in 0..5 {
        for (gap, cost) in gaps.iter().zip(costs.iter()) {
            clock.advance(Duration::from_millis(gap * (round + 1)));
            bucket.allowed(*cost);
            assert!(bucket.tokens() <= 7);
        }
    }
}

#[test]
fn rejection_is_idempotent_without_time_passing() {
    let clock = ManualClock::default();
    let mut bucket = manual_bucket(&clock, 10, 4.0, 3);
    clock.advance(Duration::from_millis(100));
    let first = bucket.allowed(5);
    let balance = bucket.tokens();
    for _ in 0..10 {
        assert_eq!(bucket.allowed(5), first);
        assert_eq!(bucket.tokens(), balance);
    }
}

#[test]
fn rejection_keeps_the_refilled_balance() {
    let clock = ManualClock::default();
    let mut bucket = manual_bucket(&clock, 10, 2.0, 1);
    clock.advance(Duration::from_secs(2));
    assert!(!bucket.allowed(8));
    assert_eq!(bucket.tokens(), 5);
}

#[test]
fn no_tokens_lost_to_truncation_over_uneven_gaps() {
    // 12 tokens per second for one second, split into odd-sized gaps.
    let clock = ManualClock::default();
    let mut bucket = manual_bucket(&clock, 100, 12.0, 0);
    let gaps_ms = [37u64, 41, 5, 120, 61, 250, 9, 77, 100, 300];
    assert_eq!(gaps_ms.iter().sum::<u64>(), 1_000);

    let mut granted = 0;
    for gap in gaps_ms {
        clock.advance(Duration::from_millis(gap));
        while bucket.allowed(1) {
            granted += 1;
        }
    }
    clock.advance(Duration::from_millis(1));
    while bucket.allowed(1) {
        granted += 1;
    }
    assert!(granted >= 12, "granted only {granted}");
}

#[test]
fn fifth_call_after_half_a_second_is_allowed() {
    let steps = [125, 125, 125, 125, 1].map(Duration::from_millis);
    let clock = ScriptedClock::starting_at(Instant::now(), &steps);
    let mut bucket = TokenBucket::with_clock(TokenBucketConfig::new(5, 10.0, 0), clock).unwrap();
    for _ in 0..4 {
        let _ = bucket.allowed(1);
    }
    assert!(bucket.allowed(1));
}

#[test]
fn zero_cost_never_mutates() {
    let clock = ManualClock::default();
    let mut bucket = manual_bucket(&clock, 3, 0.0, 3);
    for _ in 0..5 {
        assert!(bucket.allowed(0));
    }
    assert_eq!(bucket.tokens(), 3);
}

fn five_and_one() -> BurstingTokenBucket<TokenBucket, TokenBucket> {
    BurstingTokenBucket::new(
        TokenBucket::new(TokenBucketConfig::new(0, 0.0, 5)).unwrap(),
        TokenBucket::new(TokenBucketConfig::new(0, 0.0, 1)).unwrap(),
    )
}

#[test]
fn bursting_sufficient_primary() {
    let mut limiter = five_and_one();
    assert!(limiter.allowed(5));
    assert!(limiter.allowed(1));
    assert!(!limiter.allowed(1));
}

#[test]
fn bursting_shortfall_covered() {
    let mut limiter = five_and_one();
    assert!(limiter.allowed(6));
    assert!(!limiter.allowed(1));
}

#[test]
fn bursting_shortfall_too_large_touches_nothing() {
    let mut limiter = five_and_one();
    assert!(!limiter.allowed(7));
    assert_eq!(limiter.primary().tokens(), 5);
    assert_eq!(limiter.burst().tokens(), 1);
    assert!(limiter.allowed(6));
}

#[test]
fn burst_refills_slower_than_primary() {
    let clock = ManualClock::default();
    let primary = manual_bucket(&clock, 10, 10.0, 0);
    let burst = manual_bucket(&clock, 5, 1.0, 5);
    let mut limiter = BurstingTokenBucket::new(primary, burst);

    assert!(limiter.allowed(5));
    assert_eq!(limiter.burst().tokens(), 0);

    // One second later the primary is full again but the reserve holds one token.
    clock.advance(Duration::from_secs(1));
    assert!(limiter.allowed(10));
    assert!(limiter.allowed(1));
    assert_eq!(limiter.burst().tokens(), 0);
    assert!(!limiter.allowed(1));
}
