//! Diagnostic output on stderr.

use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive, e.g. `notekeep=debug`.
pub const LOG_ENV: &str = "NOTEKEEP_LOG";

/// Installs the global subscriber.
///
/// `NOTEKEEP_LOG` takes precedence, then `RUST_LOG`; otherwise the level
/// comes from the number of `-v` flags. Calling it twice is harmless.
pub fn init(verbosity: u8) {
    let var = if std::env::var_os(LOG_ENV).is_some() {
        LOG_ENV
    } else {
        EnvFilter::DEFAULT_ENV
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .with_env_var(var)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
