//! Agro Shop gateway
//!
//! ```text
//! agro_shop [--env dev|prod] [--port 5000]
//! ```
//!
//! Loads `config/{env}.yaml`, connects to PostgreSQL, ensures the schema
//! and serves the HTTP API until Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};

use agro_shop::config::AppConfig;
use agro_shop::db::Database;
use agro_shop::gateway::{run_server, state::AppState};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn main() -> Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }
    let _log_guard = agro_shop::logging::init_logging(&app_config);

    tracing::info!("Starting Agro Shop in {} mode", env);

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(serve(app_config))
}

async fn serve(config: AppConfig) -> Result<()> {
    let postgres_url = config.postgres_url.as_deref().context(
        "postgres_url is not configured (set it in the YAML file or AGRO_SHOP_POSTGRES_URL)",
    )?;

    let db = Database::connect(postgres_url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    db.init_schema()
        .await
        .context("Failed to initialize database schema")?;
    tracing::info!("Database schema ready");

    let state = Arc::new(AppState::from_database(Arc::new(db), &config));
    run_server(&config, state).await
}
