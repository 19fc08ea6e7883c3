//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; user-facing progress is
//! printed by the commands themselves.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact human readable lines
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Filter used when `RUST_LOG` is not set
///
/// # Examples
///
/// ```
/// use oneclick_cli_lib::observability::default_directive;
///
/// assert_eq!(default_directive(0), "warn");
/// assert_eq!(default_directive(2), "warn,oneclick_cli_lib=debug,oneclick=debug");
/// ```
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,oneclick_cli_lib=info,oneclick=info",
        2 => "warn,oneclick_cli_lib=debug,oneclick=debug",
        _ => "trace",
    }
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the verbosity count.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8, format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
