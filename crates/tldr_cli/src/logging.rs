use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Maps the number of `-v` flags to a log level.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global fmt subscriber once. Logs go to stderr so stdout only
/// carries the summary.
pub fn init_logging(verbosity: u8) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(level_for(verbosity))
            .with_writer(std::io::stderr)
            .init();
    });
}
