use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        embedding_model = %config.openai.embedding_model,
        naming_model = %config.openai.naming_model,
        seed = ?config.grouping.seed,
        "Configured feedback grouping"
    );

    let state = AppState::new(config);

    let router = create_router::<openapi::ApiDoc>(
        api::routes(&state),
        &state.config.server,
        &state.config.environment,
    )?;
    let app = router.merge(health_router(state.config.app));

    info!(name = %state.config.app.name, version = %state.config.app.version, "Starting feedback API");
    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Feedback API shutdown complete");
    Ok(())
}
