//! Utilities for logging.

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Output format for log lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    HumanReadable,
    Json,
}

/// Map a `-v` count onto a log level.
pub fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Configure the global logger.
///
/// `default_level` applies when `RUST_LOG` isn't set. Calling this more than
/// once is a no-op; the first subscriber wins.
pub fn configure_global_logger<W>(default_level: Level, format: LogFormat, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .from_env_lossy();

    let builder = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true);

    let result = match format {
        LogFormat::HumanReadable => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };

    if result.is_err() {
        tracing::debug!("global logger already configured");
    }
}

/// Logger for tests, output is captured by the test harness.
pub fn init_test() {
    let _ = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(Level::WARN, level_from_verbosity(0));
        assert_eq!(Level::INFO, level_from_verbosity(1));
        assert_eq!(Level::DEBUG, level_from_verbosity(2));
        assert_eq!(Level::TRACE, level_from_verbosity(7));
    }

    #[test]
    fn init_test_twice() {
        init_test();
        init_test();
        tracing::debug!("logger still usable");
    }
}
