//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use catalog_api::db::{DbPool, establish_connection_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
///
/// The file lives in its own temporary directory, which is removed together
/// with the WAL side files when the value is dropped.
pub struct TestDb {
    pool: DbPool,
    path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let database_url = path.to_str().expect("Temporary path is not UTF-8.");

        let pool =
            establish_connection_pool(database_url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            pool,
            path,
            _dir: dir,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
