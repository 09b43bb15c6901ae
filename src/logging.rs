//! Native log output for the kit's `tracing` events

use tracing_subscriber::{fmt, EnvFilter};

/// Env var that switches output to JSON lines.
pub const LOG_JSON_VAR: &str = "DAPPKIT_LOG_JSON";

/// Filter used when `RUST_LOG` is unset: connection outcomes from this
/// crate, warnings from everything else.
pub const DEFAULT_DIRECTIVES: &str = "warn,dappkit=info";

fn json_requested(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1" | "true" | "json"))
}

/// Install a stderr subscriber filtered by `RUST_LOG` (default
/// [`DEFAULT_DIRECTIVES`]). Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let use_json = json_requested(std::env::var(LOG_JSON_VAR).ok().as_deref());

    if use_json {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .pretty()
            .with_writer(std::io::stderr)
            .try_init();
    }
}
