//! # meetnote-db
//!
//! Storage layer for meetnote.
//!
//! This crate provides:
//! - Connection pool management
//! - [`PgMeetingRepository`], the PostgreSQL `meetings` table mapper
//! - [`InMemoryMeetingRepository`] for tests and ephemeral deployments
//! - Schema migrations (feature `migrations`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use meetnote_db::{CreateMeetingRequest, Database, MeetingRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/meetnote").await?;
//!     let meeting = db
//!         .meetings
//!         .insert(CreateMeetingRequest::new("Kickoff", chrono::Utc::now()))
//!         .await?;
//!     println!("Created meeting {}", meeting.id);
//!     Ok(())
//! }
//! ```

pub mod meetings;
pub mod memory;
pub mod pool;

// Test fixtures for integration tests
pub mod test_fixtures;

// Re-export core types
pub use meetnote_core::*;

pub use meetings::PgMeetingRepository;
pub use memory::InMemoryMeetingRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};

/// PostgreSQL database context.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Meeting repository for CRUD operations.
    pub meetings: PgMeetingRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            meetings: PgMeetingRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
