//! Tracing subscriber setup for binaries and test harnesses
//!
//! The checks only emit events: failures at `debug`, passes at `trace`.
//! Applications that want to see them install a subscriber here.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Configuration for tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable console output with colors (default)
    Console,
    /// Compact output without colors for CI logs
    Compact,
}

/// Tracing configuration builder
#[derive(Debug)]
pub struct TracingConfig {
    /// Verbosity level (maps to log levels)
    pub verbosity: u8,
    pub format: TracingFormat,
    /// Environment filter string (overrides verbosity if set)
    pub env_filter: Option<String>,
    /// Route output through the libtest capture writer
    pub test_writer: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            format: TracingFormat::Console,
            env_filter: None,
            test_writer: false,
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity level (0-2+)
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Set custom environment filter, e.g. `vartest=debug`
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn with_test_writer(mut self, test_writer: bool) -> Self {
        self.test_writer = test_writer;
        self
    }

    /// Convert verbosity level to tracing filter string
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "info",
            1 => "debug", // failed checks
            _ => "trace", // every check
        }
    }

    /// Level filter for this configuration; `env_filter` wins over verbosity
    pub fn filter(&self) -> anyhow::Result<EnvFilter> {
        let directives = self
            .env_filter
            .as_deref()
            .unwrap_or_else(|| self.verbosity_to_filter());
        Ok(EnvFilter::try_new(directives)?)
    }

    /// Install the global subscriber
    ///
    /// Fails if a global subscriber is already installed or the filter
    /// string does not parse.
    pub fn init(self) -> anyhow::Result<()> {
        use tracing_subscriber::fmt;

        let registry = Registry::default().with(self.filter()?);

        match (self.format, self.test_writer) {
            (TracingFormat::Console, false) => registry
                .with(fmt::layer().with_ansi(true).with_target(false).compact())
                .try_init()?,
            (TracingFormat::Compact, false) => registry
                .with(fmt::layer().with_ansi(false).with_target(false).compact())
                .try_init()?,
            (_, true) => registry
                .with(fmt::layer().with_ansi(false).with_test_writer().compact())
                .try_init()?,
        }

        Ok(())
    }
}

/// Initialize tracing from `RUST_LOG`, doing nothing if a subscriber is already set
pub fn init_env_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
    {
        tracing::debug!("vartest tracing initialized");
    }
}
