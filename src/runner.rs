use crate::config::Config;
use crate::limiter::TokenLimiter;
use crate::shared::SharedLimiter;
use futures::future::join_all;
use serde::Serialize;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::time::{sleep, Duration, Instant};
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct RunSettings {
    pub action_cost: u64,
    pub interval: Duration,
    pub workers: usize,
    pub max_actions: Option<u64>,
}

impl From<&Config> for RunSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            action_cost: cfg.action_cost,
            interval: Duration::from_millis(cfg.interval_ms),
            workers: cfg.workers.max(1),
            max_actions: cfg.max_actions,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Actions admitted across all workers.
    pub granted: u64,
    pub rejected: u64,
    pub remaining_tokens: u64,
    pub elapsed_ms: u64,
}

/// Drive the limiter from `workers` tasks until each one is rejected (or has
/// done `max_actions` actions).
pub async fn run<L>(limiter: Arc<SharedLimiter<L>>, settings: RunSettings) -> RunSummary
where
    L: TokenLimiter + Send + 'static,
{
    if settings.action_cost == 0 && settings.max_actions.is_none() {
        warn!("action cost is 0 and no action cap is set; workers will never be rejected");
    }

    let start = Instant::now();
    let granted = Arc::new(AtomicU64::new(0));
    let rejected = Arc::new(AtomicU64::new(0));

    let mut handles = Vec::with_capacity(settings.workers.max(1));
    for worker in 0..settings.workers.max(1) {
        let limiter = limiter.clone();
        let granted = granted.clone();
        let rejected = rejected.clone();
        let settings = settings.clone();
        handles.push(tokio::spawn(async move {
            let mut done = 0u64;
            loop {
                if settings.max_actions.is_some_and(|max| done >= max) {
                    break;
                }
                if !limiter.allowed(settings.action_cost) {
                    rejected.fetch_add(1, Ordering::Relaxed);
                    break;
                }
                done += 1;
                granted.fetch_add(1, Ordering::Relaxed);
                info!(worker, "allowed!");
                if settings.interval.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    sleep(settings.interval).await;
                }
            }
        }));
    }

    for res in join_all(handles).await {
        if let Err(e) = res {
            warn!("worker task failed: {:?}", e);
        }
    }

    RunSummary {
        granted: granted.load(Ordering::Relaxed),
        rejected: rejected.load(Ordering::Relaxed),
        remaining_tokens: limiter.tokens(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    }
}
