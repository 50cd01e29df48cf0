use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

use crate::error::Result;

pub mod check;

/// Unified access layer for the check database.
///
/// All methods are `async fn` over SeaORM. The store is built once at
/// startup and shared through the server state; every query borrows a
/// pooled connection for its own duration only.
pub struct CheckStore {
    pub(crate) db: DatabaseConnection,
}

impl CheckStore {
    /// Connects to `db_url` and brings the schema up to date.
    ///
    /// SQLite example: `sqlite://data/zonecheck.db?mode=rwc`.
    /// With `debug` set, every SQL statement is logged.
    pub async fn new(db_url: &str, debug: bool) -> Result<Self> {
        let mut opts = ConnectOptions::new(db_url.to_owned());
        opts.sqlx_logging(debug);
        let db = Database::connect(opts).await?;

        // WAL only applies to on-disk SQLite databases
        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            db.execute_unprepared("PRAGMA journal_mode=WAL;").await?;
        }

        Migrator::up(&db, None).await?;

        tracing::info!(db_url = %db_url, "Initialized check store");
        Ok(Self { db })
    }

    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
