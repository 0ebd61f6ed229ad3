use anyhow::Result;
use burst_rate_limit::config::Config;
use burst_rate_limit::runner::{self, RunSettings};
use burst_rate_limit::SharedLimiter;
use std::{env, path::PathBuf, sync::Arc};
use tracing::{info, warn};

static DEFAULT_CONFIG_PATH: &str = "limiter.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_target(true)
        .compact()
        .init();

    // Load config; an explicit path must exist, the default one may be absent
    let explicit = env::var("RL_CONFIG_PATH").ok();
    let cfg_path = PathBuf::from(explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string()));
    let cfg = if explicit.is_none() && !cfg_path.exists() {
        let mut cfg = Config::default();
        burst_rate_limit::config::apply_env_overrides(&mut cfg);
        info!("no {} found, using built-in limiter settings", DEFAULT_CONFIG_PATH);
        cfg
    } else {
        Config::load_from_path(&cfg_path)?
    };
    info!(
        capacity = cfg.bucket.capacity,
        rate = cfg.bucket.refill_rate_per_second,
        bursting = cfg.burst.is_some(),
        "loaded limiter config"
    );

    let limiter = Arc::new(SharedLimiter::new(cfg.build_limiter()?));
    let settings = RunSettings::from(&cfg);

    tokio::select! {
        summary = runner::run(limiter, settings) => {
            info!("done, finally not allowed");
            info!("summary {}", serde_json::to_string(&summary)?);
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted");
        }
    }
    Ok(())
}
