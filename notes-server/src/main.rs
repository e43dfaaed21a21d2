use notes_auth::{AuthService, JwtValidator, OtpHasher, TokenIssuer};
use notes_db::UserRepository;
use notes_mail::{HttpMailer, LogMailer, Mailer};
use notes_server::{AppState, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = notes_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = notes_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting notes-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/notes-db/migrations")
        .run(&pool)
        .await?;
    info!("Migrations complete");

    // The signing secret; validate() guarantees presence
    let jwt_secret = config
        .auth
        .jwt_secret
        .as_deref()
        .expect("validate() ensures auth.jwt_secret is set")
        .as_bytes()
        .to_vec();

    // Mail delivery: real API client when a key is configured, log-only
    // fallback for local development
    let mailer: Arc<dyn Mailer> = if let Some(ref api_key) = config.mail.api_key {
        info!("Mail: API delivery enabled");
        Arc::new(HttpMailer::new(
            &config.mail.api_url,
            api_key,
            &config.mail.from,
            config.auth.otp_ttl_minutes,
        ))
    } else {
        warn!("Mail delivery DISABLED - OTP codes will be logged (development mode)");
        Arc::new(LogMailer)
    };

    // Assemble the auth core
    let auth = Arc::new(AuthService::new(
        UserRepository::new(pool.clone()),
        mailer,
        OtpHasher::new(config.auth.otp_hash_cost)?,
        TokenIssuer::new(&jwt_secret, config.auth.token_ttl_days),
        config.auth.otp_ttl_minutes,
        config.auth.otp_length,
    ));
    let validator = Arc::new(JwtValidator::with_hs256(&jwt_secret));

    // Build application state
    let app_state = AppState {
        pool,
        auth,
        validator,
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
