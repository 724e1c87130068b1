#![forbid(unsafe_code)]

//! Process-wide `tracing` subscriber setup.
//!
//! Filtering follows `MLSHARE_LOG` (same syntax as `RUST_LOG`), falling back
//! to `warn`. Terminal hosts must pass a writer that is *not* stdout, or the
//! log lines end up on top of the rendered page.

use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "MLSHARE_LOG";

/// Default directive when [`LOG_ENV`] is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Text,
    /// One JSON object per record.
    Json,
}

/// Build the filter from [`LOG_ENV`], or from `fallback` when unset.
#[must_use]
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber writing to `writer`.
///
/// Returns `false` if a global subscriber was already installed (tests, or a
/// host that set one up itself). That is not an error.
pub fn init<W>(format: LogFormat, writer: W) -> bool
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_DIRECTIVE))
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);
    let installed = match format {
        LogFormat::Text => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    };
    if installed {
        tracing::debug!(?format, "logging initialised");
    }
    installed
}

/// Install the global subscriber writing to stderr.
pub fn init_stderr(format: LogFormat) -> bool {
    init(format, io::stderr)
}

/// Install the global subscriber writing to a file.
pub fn init_file(format: LogFormat, file: std::fs::File) -> bool {
    init(format, Mutex::new(file))
}
