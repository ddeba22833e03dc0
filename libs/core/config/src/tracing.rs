use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

const PRODUCTION_FILTER: &str = "info,tower_http=info,reqwest=warn,hyper=warn";
const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,hyper=info,reqwest=info";

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main() before any fallible operations. Safe to call
/// multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Default `EnvFilter` directives for an environment, used when `RUST_LOG` is unset
pub fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        PRODUCTION_FILTER
    } else {
        DEVELOPMENT_FILTER
    }
}

/// Initialize tracing with environment-aware configuration and error span capture.
///
/// - **Production** (`APP_ENV=production`): flattened JSON events for log
///   aggregation, module targets hidden.
/// - **Development** (default): pretty-printed, human-readable output.
///
/// Both modes include `ErrorLayer` so `eyre` reports carry span traces.
/// `RUST_LOG` overrides the default levels.
///
/// Safe to call more than once; later calls are ignored (common in tests).
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
