// database handle - a pool plus the dialect it talks to
// supports postgres and sqlite (repository sql uses $n placeholders)

use crate::Error;
use sqlx::{AnyPool, any::AnyPoolOptions};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone)]
pub struct Db {
    pool: AnyPool,
    dialect: Dialect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Db {
    pub async fn connect(url: &str) -> Result<Self, Error> {
        Self::connect_with(url, DEFAULT_MAX_CONNECTIONS).await
    }

    pub async fn connect_with(url: &str, max_connections: u32) -> Result<Self, Error> {
        if max_connections == 0 {
            return Err(Error::Config("max connections must be at least 1".into()));
        }

        sqlx::any::install_default_drivers();

        let dialect = detect_dialect(url)
            .ok_or_else(|| Error::Config(format!("unsupported database url: {url}")))?;

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        tracing::debug!(dialect = dialect.name(), max_connections, "pool ready");

        Ok(Self { pool, dialect })
    }

    // connectivity probe run before serving
    pub async fn ping(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
        }
    }
}

// figure out dialect from connection string
fn detect_dialect(url: &str) -> Option<Dialect> {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Some(Dialect::Postgres)
    } else if url.starts_with("sqlite:") {
        Some(Dialect::Sqlite)
    } else {
        None
    }
}
