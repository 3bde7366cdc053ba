//! meetnote API server binary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meetnote_api::{
    app, build_rate_limiter, parse_allowed_origins, AppState, ServerConfig, StorageBackend,
};
use meetnote_core::MeetingRepository;
use meetnote_db::{Database, InMemoryMeetingRepository, PoolConfig};

/// Split `LOG_FILE` into the directory and file name the daily roller wants.
fn log_file_target(path: &str) -> (PathBuf, String) {
    let path = Path::new(path);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("meetnote-api.log");
    (dir.to_path_buf(), name.to_string())
}

/// Install the global subscriber.
///
/// Reads `LOG_FORMAT` (`json` or text), `LOG_FILE` (daily-rolled file instead
/// of stdout), `LOG_ANSI` and `RUST_LOG`. The returned guard flushes the file
/// writer and must live as long as the process.
fn init_tracing() -> Option<WorkerGuard> {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json");
    let log_file = std::env::var("LOG_FILE").ok();
    let ansi = std::env::var("LOG_ANSI").ok().map(|v| v == "true" || v == "1");

    let (writer, guard) = match log_file.as_deref() {
        Some(path) => {
            let (dir, name) = log_file_target(path);
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "meetnote_api=debug,tower_http=debug".into());
    // Escape codes only go to a file when explicitly requested.
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi.unwrap_or(log_file.is_none()));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer).init();
    }

    info!(
        json,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing();

    let config = ServerConfig::from_env()?;

    let meetings: Arc<dyn MeetingRepository> = match config.storage_backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool_config = PoolConfig::new().max_connections(config.db_max_connections);
            let db = Database::connect_with_config(&config.database_url, pool_config).await?;
            info!("Database connected");

            info!("Running database migrations...");
            db.migrate().await?;
            info!("Database migrations complete");

            Arc::new(db.meetings)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; records are lost on restart");
            Arc::new(InMemoryMeetingRepository::new())
        }
    };

    let rate_limiter = if config.rate_limit_enabled {
        build_rate_limiter(config.rate_limit_requests, config.rate_limit_period_secs)
    } else {
        None
    };
    info!(
        "Rate limiting: {} ({} requests per {} seconds)",
        if rate_limiter.is_some() {
            "enabled"
        } else {
            "disabled"
        },
        config.rate_limit_requests,
        config.rate_limit_period_secs
    );

    let state = AppState::new(meetings).with_rate_limiter(rate_limiter);
    let router = app(state, parse_allowed_origins(&config.allowed_origins));

    let addr = config.addr()?;
    info!(
        storage_backend = %config.storage_backend,
        "Starting server on {}",
        addr
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_target_splits_path() {
        let (dir, name) = log_file_target("/var/log/meetnote/api.log");
        assert_eq!(dir, PathBuf::from("/var/log/meetnote"));
        assert_eq!(name, "api.log");
    }

    #[test]
    fn test_log_file_target_bare_name_uses_cwd() {
        let (dir, name) = log_file_target("api.log");
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "api.log");
    }
}
