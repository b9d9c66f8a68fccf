// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit construction, no global connection
// - Exactly one SQLite connection per process
// - Clear error propagation

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a pool backed by the database file at `db_path`
///
/// The parent directory is created if missing. The file itself is created by
/// SQLite on first open.
pub fn create_connection_pool(db_path: &Path) -> AppResult<ConnectionPool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    });

    log::debug!("Opening database at {}", db_path.display());
    build_pool(manager)
}

/// Create a pool over a private in-memory database (for tests)
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    build_pool(SqliteConnectionManager::memory())
}

/// Pool configuration:
/// - A single connection, opened at build time and kept until the pool drops.
///   An in-memory database lives exactly as long as its connection, so the
///   connection is never recycled.
/// - Short checkout timeout; nothing else ever holds the connection for long
fn build_pool(manager: SqliteConnectionManager) -> AppResult<ConnectionPool> {
    Pool::builder()
        .max_size(1)
        .max_lifetime(None)
        .idle_timeout(None)
        .connection_timeout(Duration::from_secs(5))
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))
}

/// Get the connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}
