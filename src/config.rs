use crate::bursting::BurstingTokenBucket;
use crate::error::ConfigError;
use crate::limiter::TokenLimiter;
use crate::token_bucket::{TokenBucket, TokenBucketConfig};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_action_cost")]
    pub action_cost: u64,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Per-worker cap on admitted actions. None => run until rejected.
    #[serde(default)]
    pub max_actions: Option<u64>,
    #[serde(default = "default_bucket")]
    pub bucket: TokenBucketConfig,
    /// Slow reserve the bucket may borrow from. None => plain token bucket.
    #[serde(default)]
    pub burst: Option<TokenBucketConfig>,
}
fn default_action_cost() -> u64 { 2 }
fn default_interval_ms() -> u64 { 100 }
fn default_workers() -> usize { 1 }
fn default_bucket() -> TokenBucketConfig { TokenBucketConfig::new(10, 10.0, 5) }

impl Default for Config {
    fn default() -> Self {
        Self {
            action_cost: default_action_cost(),
            interval_ms: default_interval_ms(),
            workers: default_workers(),
            max_actions: None,
            bucket: default_bucket(),
            burst: None,
        }
    }
}

impl Config {
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut cfg: Self = serde_yaml::from_str(&content)?;
        apply_env_overrides(&mut cfg);
        Ok(cfg)
    }

    /// Build the configured limiter, a bursting one when a reserve is set.
    pub fn build_limiter(&self) -> Result<Box<dyn TokenLimiter + Send>, ConfigError> {
        let bucket = TokenBucket::new(self.bucket).map_err(|e| e.in_bucket("bucket"))?;
        match self.burst {
            None => Ok(Box::new(bucket)),
            Some(burst_cfg) => {
                let burst = TokenBucket::new(burst_cfg).map_err(|e| e.in_bucket("burst"))?;
                Ok(Box::new(BurstingTokenBucket::new(bucket, burst)))
            }
        }
    }
}

pub fn apply_env_overrides(cfg: &mut Config) {
    apply_overrides(cfg, |key| env::var(key).ok());
}

pub fn apply_overrides(cfg: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(cost) = lookup("RL_ACTION_COST") {
        if let Ok(c) = cost.parse::<u64>() { cfg.action_cost = c; }
    }
    if let Some(ms) = lookup("RL_INTERVAL_MS") {
        if let Ok(v) = ms.parse::<u64>() { cfg.interval_ms = v; }
    }
    if let Some(n) = lookup("RL_WORKERS") {
        if let Ok(w) = n.parse::<usize>() { cfg.workers = w.max(1); }
    }
    if let Some(n) = lookup("RL_MAX_ACTIONS") {
        cfg.max_actions = n.parse::<u64>().ok();
    }
    if let Some(flag) = lookup("RL_BURST") {
        if flag == "0" { cfg.burst = None; }
    }
}
