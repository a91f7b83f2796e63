//! Tracing subscriber setup. Everything goes to stderr so `--dry-run` output on
//! stdout stays clean.

use std::io;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{Error, Result};

pub const LOG_ENV: &str = "XEBEC_LOG";

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    pub verbose: bool,
    pub json: bool,
}

impl LogOptions {
    fn default_directive(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

/// `XEBEC_LOG` wins when it parses; otherwise the verbosity default applies.
pub fn build_filter(raw: Option<&str>, opts: LogOptions) -> EnvFilter {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(opts.default_directive()))
}

pub fn init(opts: LogOptions) -> Result<()> {
    let raw = std::env::var(LOG_ENV).ok();
    let filter = build_filter(raw.as_deref(), opts);

    let fmt_layer = if opts.json {
        fmt::layer().json().with_writer(io::stderr).boxed()
    } else {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .map_err(|e| Error::msg(format!("logging init failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_verbosity() {
        let quiet = build_filter(None, LogOptions::default());
        assert_eq!(quiet.to_string(), "warn");
        let loud = build_filter(
            None,
            LogOptions {
                verbose: true,
                json: false,
            },
        );
        assert_eq!(loud.to_string(), "debug");
    }

    #[test]
    fn env_value_overrides_default() {
        let f = build_filter(Some("xebec_dots=trace"), LogOptions::default());
        assert_eq!(f.to_string(), "xebec_dots=trace");
        let blank = build_filter(Some("  "), LogOptions::default());
        assert_eq!(blank.to_string(), "warn");
    }
}
