/// Rejected bucket configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("refill rate must be a finite, non-negative number of tokens per second, got {rate}")]
    InvalidRefillRate { rate: f64 },

    #[error("invalid `{name}` bucket: {source}")]
    InvalidBucket {
        name: &'static str,
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    pub(crate) fn in_bucket(self, name: &'static str) -> Self {
        ConfigError::InvalidBucket { name, source: Box::new(self) }
    }
}
