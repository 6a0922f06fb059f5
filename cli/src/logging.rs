//! stderr logging for the CLI. Stdout carries command output only.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const FALLBACK_FILTER: &str = "warn";

/// The `log:` section of `partykit.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `info` or `warn,partykit_rpc=debug`.
    /// Unset means `RUST_LOG`, then `warn`.
    pub level: Option<String>,
    pub json: bool,
}

impl LogConfig {
    fn filter(&self, rust_log: Option<String>) -> EnvFilter {
        self.level
            .clone()
            .or(rust_log)
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(FALLBACK_FILTER))
    }
}

pub fn init(config: &LogConfig) {
    let filter = config.filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    if let Err(e) = installed {
        eprintln!("partykit: logging disabled: {e}");
    }
}
