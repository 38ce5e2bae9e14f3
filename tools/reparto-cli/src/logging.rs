//! Tracing setup. Logs go to stderr so they never mix with command output.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` raises the
/// reparto crates to `debug`.
pub fn init(config: &LogConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(config, verbose));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose);

    // A subscriber may already be set when commands run under test.
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn filter_for(config: &LogConfig, verbose: bool) -> EnvFilter {
    let directives = if verbose {
        format!("{},reparto_data=debug,reparto_app=debug,reparto_cli=debug", config.level)
    } else {
        config.level.clone()
    };
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"))
}
