use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre for startup error reports.
///
/// Call this first in main(). Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware formatting and span capture.
///
/// - **Production** (`APP_ENV=production`): flattened JSON lines, no targets.
/// - **Development** (default): pretty, human-readable output.
///
/// `RUST_LOG` overrides the default filter in both modes. Repeated calls are
/// ignored, which keeps tests that initialize tracing independent.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info,tower_http=warn")
        } else {
            EnvFilter::new("debug,hyper=info,reqwest=info,ort=warn")
        }
    });

    let result = if is_production {
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
        Ok(_) => info!("Tracing initialized. Environment: {:?}", environment),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
