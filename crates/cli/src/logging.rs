//! Logger setup for the binary.

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

/// Installs the global logger. Logs go to stderr so stdout stays clean for
/// `--json` output.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `--verbose`.
pub fn init_logging(verbose: bool) {
    let mut builder = Builder::new();

    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Info);
    }

    builder.write_style(WriteStyle::Auto);
    // A second init (e.g. from a test harness) is harmless.
    let _ = builder.try_init();

    log::debug!("logging initialized");
}
