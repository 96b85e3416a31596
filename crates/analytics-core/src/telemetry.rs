//! Tracing initialisation for analytics binaries.
//!
//! Libraries never install a subscriber; binaries call [`init_tracing`] once
//! at start-up. Later calls are no-ops because the global subscriber can only
//! be set once per process.

use tracing::Level;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Environment variable selecting JSON log lines (`json`) over text.
pub const LOG_FORMAT_ENV_VAR: &str = "ANALYTICS_LOG_FORMAT";

/// Whether the environment asks for JSON log lines.
pub fn json_requested_by_env() -> bool {
    std::env::var(LOG_FORMAT_ENV_VAR)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` is the default verbosity.
/// Logs go to stderr so payloads and templates on stdout stay clean.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let lines = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let output: Box<dyn Layer<Registry> + Send + Sync> = if json {
        Box::new(lines.json())
    } else {
        Box::new(lines)
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_tracing(false, Level::WARN);
        init_tracing(true, Level::DEBUG);
        tracing::info!("still logging after a second init");
    }
}
