//! Postgres access. Every handler goes through [`Database::ready`], which
//! creates the schema and seeds the default admin the first time it runs.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::OnceCell;

use crate::config::DefaultAdmin;
use crate::utils::error::AppError;

pub mod events;
pub mod schema;
pub mod users;

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub admin: DefaultAdmin,
    pub default_location: String,
    pub sample_events: bool,
}

pub struct Database {
    pool: PgPool,
    seed: SeedOptions,
    initialized: OnceCell<()>,
}

impl Database {
    pub async fn connect(
        url: &str,
        max_connections: u32,
        seed: SeedOptions,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::from_pool(pool, seed))
    }

    /// Builds the pool without opening a connection.
    pub fn connect_lazy(url: &str, seed: SeedOptions) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new().connect_lazy(url)?;
        Ok(Self::from_pool(pool, seed))
    }

    pub fn from_pool(pool: PgPool, seed: SeedOptions) -> Self {
        Self {
            pool,
            seed,
            initialized: OnceCell::new(),
        }
    }

    /// Returns the pool once the schema exists. A failed initialization
    /// leaves the cell empty, so the next caller retries it.
    pub async fn ready(&self) -> Result<&PgPool, AppError> {
        self.initialized
            .get_or_try_init(|| async {
                tracing::info!("Database not initialized, initializing now");
                schema::initialize(&self.pool, &self.seed).await
            })
            .await?;
        Ok(&self.pool)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.initialized()
    }

    /// The raw pool, bypassing initialization.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn seed(&self) -> &SeedOptions {
        &self.seed
    }
}
