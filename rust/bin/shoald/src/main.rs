//! `shoald` — the Shoal server binary.
//!
//! Usage:
//!   shoald -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/shoal/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod auth_middleware;
mod config;
mod directory;
mod hasher;
mod routes;

use std::sync::Arc;

use clap::Parser;
use jsonwebtoken::{DecodingKey, Validation};
use shoal_core::Module;
use tracing::info;

use auth_middleware::JwtState;
use config::ServerConfig;

/// Shoal server.
#[derive(Parser, Debug)]
#[command(name = "shoald", about = "Shoal server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides default 0.0.0.0:8080).
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    server_config.verify()?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = shoal_core::ServiceConfig {
        data_dir: Some(data_dir.clone()),
        listen: cli.listen.clone(),
        ..Default::default()
    };

    let sql: Arc<dyn shoal_sql::SQLStore> = Arc::new(
        shoal_sql::SqliteStore::open(&core_config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    // ── Modules ──

    let accounts_config = accounts::service::AccountsConfig {
        jwt_secret: server_config.jwt.secret.clone(),
        token_ttl: server_config.jwt.expire_secs,
    };
    let password_hasher: Arc<dyn accounts::hasher::PasswordHasher> =
        Arc::new(hasher::SaltedSha256);
    let accounts_module =
        accounts::AccountsModule::new(Arc::clone(&sql), password_hasher, accounts_config)?;
    info!("Accounts module initialized");

    // The follow module reads account privacy through the directory seam.
    let account_directory: Arc<dyn follow::directory::AccountDirectory> = Arc::new(
        directory::DirectoryAdapter::new(Arc::clone(accounts_module.service())),
    );
    let follow_module = follow::FollowModule::new(Arc::clone(&sql), account_directory)?;
    info!("Follow module initialized");

    let feed_module = feed::FeedModule::new(Arc::clone(&sql))?;
    info!("Feed module initialized");

    let module_routes = vec![
        (accounts_module.name(), accounts_module.routes()),
        (follow_module.name(), follow_module.routes()),
        (feed_module.name(), feed_module.routes()),
    ];

    // Build JWT state for middleware.
    let jwt_state = Arc::new(JwtState {
        decoding_key: DecodingKey::from_secret(server_config.jwt.secret.as_bytes()),
        validation: Validation::default(),
    });

    // Build router.
    let app = routes::build_router(jwt_state, module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("Shoal server listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
