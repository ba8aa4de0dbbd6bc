//! Apply the schema and pending migrations, then exit.

use crate::config::prepare_db_path;
use crate::error::Result;
use crate::storage::SqliteStorage;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Serialize)]
struct MigrateOutput {
    database: PathBuf,
    versions: Vec<String>,
}

/// Execute the migrate command.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub fn execute(db: Option<&Path>, json: bool) -> Result<()> {
    let database = prepare_db_path(db)?;
    let storage = SqliteStorage::open(&database)?;
    let versions = storage.applied_migrations()?;
    info!(db = %database.display(), count = versions.len(), "Database is up to date");

    if json {
        println!("{}", serde_json::to_string(&MigrateOutput { database, versions })?);
        return Ok(());
    }

    println!("{} {}", "Database ready:".green(), database.display());
    for version in &versions {
        println!("  {} {version}", "applied".dimmed());
    }
    Ok(())
}
