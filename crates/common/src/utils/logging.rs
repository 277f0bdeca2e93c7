use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";
const DEBUG_FILTER: &str = "debug,tower_http=debug,axum=info";

/// Output options for the process-wide tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Lower the default level to `debug` (ignored when `RUST_LOG` is set).
    pub debug: bool,
    /// Emit structured JSON lines instead of the compact text format.
    pub json: bool,
}

fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug { DEBUG_FILTER } else { DEFAULT_FILTER })
    })
}

/// Initialize tracing subscriber with stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info` (or debug levels with `opts.debug`)
/// - Writes to stdout to improve visibility in environments that hide stderr
///
/// Calling it twice is harmless; the first subscriber wins.
pub fn init_logging(opts: LogOptions) {
    let env_filter = env_filter(opts.debug);
    if opts.json {
        let _ = fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .with_writer(io::stdout)
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .with_writer(io::stdout)
            .try_init();
    }
}
