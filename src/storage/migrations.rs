//! Database migrations embedded at compile time.
//!
//! Migrations are sourced from `/migrations/` at the repo root and
//! embedded into the binary using `include_str!`, so the binary carries
//! no runtime file dependencies.

use rusqlite::{Connection, Result};
use tracing::{debug, info, warn};

/// A single migration with version identifier and SQL content.
struct Migration {
    version: &'static str,
    sql: &'static str,
}

/// All migrations in order.
///
/// Version names match the SQL filenames (without .sql extension).
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "001_add_archive_columns",
        sql: include_str!("../../migrations/001_add_archive_columns.sql"),
    },
    Migration {
        version: "002_add_user_archive_index",
        sql: include_str!("../../migrations/002_add_user_archive_index.sql"),
    },
];

/// Split a migration file into its statements, dropping comment-only chunks.
fn statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';').map(str::trim).filter(|chunk| {
        chunk.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("--")
        })
    })
}

/// Run all pending migrations on the database.
///
/// Already-applied migrations (tracked in `schema_migrations`) are
/// skipped, so this is safe to call on every open. Each migration runs in
/// its own transaction, one statement at a time; an `ADD COLUMN` for a
/// column that already exists is skipped and the rest of the file still
/// runs.
///
/// # Errors
///
/// Returns an error if any other statement fails. That migration is rolled
/// back and left unrecorded.
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let applied: std::collections::HashSet<String> = conn
        .prepare("SELECT version FROM schema_migrations")?
        .query_map([], |row| row.get(0))?
        .collect::<Result<_, _>>()?;

    let mut count = 0;
    for migration in MIGRATIONS {
        if applied.contains(migration.version) {
            debug!(version = migration.version, "Migration already applied");
            continue;
        }

        info!(version = migration.version, "Applying migration");

        let tx = conn.unchecked_transaction()?;
        for statement in statements(migration.sql) {
            if let Err(e) = tx.execute_batch(statement) {
                if e.to_string().contains("duplicate column name") {
                    warn!(version = migration.version, error = %e, "Column already exists, skipping");
                } else {
                    return Err(e);
                }
            }
        }

        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![migration.version, chrono::Utc::now().timestamp_millis()],
        )?;
        tx.commit()?;
        count += 1;

        info!(version = migration.version, "Migration complete");
    }

    Ok(count)
}

/// Number of embedded migrations.
#[must_use]
pub fn migration_count() -> usize {
    MIGRATIONS.len()
}
