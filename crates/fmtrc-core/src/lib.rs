//! fmtrc Core
//!
//! Loads formatter configuration files and resolves the effective
//! formatting options for individual files. The formatting engine itself is
//! out of scope: it receives the resolved [`OptionSet`] and nothing else.

pub mod config;
pub mod error;
pub mod result;

// Configuration system
pub use config::{
    ArrowParens, ConfigFile, ConfigFormat, ConfigLoader, Configuration, EndOfLine, FilePattern,
    OptionName, OptionSet, OptionValue, OverrideConfig, OverrideRule, PatternList, ProseWrap,
    QuoteProps, TrailingComma,
};
pub use error::{ErrorKind, FmtrcError};
pub use result::Result;

/// Initialize the tracing subscriber for logging
///
/// Honors `RUST_LOG`; falls back to `fmtrc=info`.
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "fmtrc=info".to_string());
    init_tracing_with_filter(&filter);
}

/// Initialize the tracing subscriber with an explicit filter directive
///
/// Logs go to stderr so that stdout stays machine-readable.
pub fn init_tracing_with_filter(directive: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("fmtrc=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
