//! Print an Argon2 hash for seeding users by hand.

use crate::auth::hash_password;
use crate::error::Result;
use crate::validate::validate_password;
use serde::Serialize;

#[derive(Serialize)]
struct HashOutput {
    hash: String,
}

/// Execute the hash-password command.
///
/// # Errors
///
/// Returns `InvalidArgument` for a password the API would reject.
pub fn execute(password: &str, json: bool) -> Result<()> {
    validate_password(password)?;
    let hash = hash_password(password)?;

    if json {
        println!("{}", serde_json::to_string(&HashOutput { hash })?);
    } else {
        println!("{hash}");
    }
    Ok(())
}
