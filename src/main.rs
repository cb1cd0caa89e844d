use api_rest::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textlens_core::{
    config::{database_location_from_env_value, keyword_count_from_env_value},
    AnalysisService, CoreConfig,
};

const DEFAULT_REST_ADDR: &str = "0.0.0.0:5000";

/// Main entry point for the TextLens application
///
/// Resolves configuration once, builds the analysis service and serves the REST API.
///
/// # Environment Variables
/// - `TEXTLENS_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `TEXTLENS_DATABASE`: SQLite database file, or `:memory:` (default: "textlens.db")
/// - `TEXTLENS_KEYWORD_COUNT`: keywords extracted per text, 1 to 50 (default: 3)
/// - `RUST_LOG`: log filter, on top of the info-level defaults below
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, storage or server startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("textlens_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("textlens_core=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("TEXTLENS_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let cfg = CoreConfig::new(
        database_location_from_env_value(std::env::var("TEXTLENS_DATABASE").ok()),
        keyword_count_from_env_value(std::env::var("TEXTLENS_KEYWORD_COUNT").ok())?,
    )?;

    tracing::info!("++ Using database {}", cfg.database().display());
    tracing::info!("++ Extracting {} keyword(s) per text", cfg.keyword_count());

    let service = AnalysisService::from_config(&cfg)?;
    let app = api_rest::router(AppState::new(service));

    tracing::info!("++ Starting TextLens REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
