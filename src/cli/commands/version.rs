//! Print the binary and schema versions.

use crate::error::Result;
use crate::storage::migrations::migration_count;
use crate::storage::schema::CURRENT_SCHEMA_VERSION;
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct VersionInfo {
    version: &'static str,
    profile: &'static str,
    schema_version: i32,
    migrations: usize,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            profile: if cfg!(debug_assertions) { "debug" } else { "release" },
            schema_version: CURRENT_SCHEMA_VERSION,
            migrations: migration_count(),
        }
    }
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let info = VersionInfo::current();

    if json {
        println!("{}", serde_json::to_string(&info)?);
    } else {
        println!(
            "bucketlist {} {}",
            info.version.bold(),
            format!(
                "({}, schema v{} + {} migrations)",
                info.profile, info.schema_version, info.migrations
            )
            .dimmed()
        );
    }
    Ok(())
}
