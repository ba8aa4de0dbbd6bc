//! Input validation for request payloads and path segments.
//!
//! Every helper returns `Error::InvalidArgument` with the message the
//! client sees, so handlers can use `?` directly.

use crate::error::{Error, Result};
use crate::model::{ItemCategory, ItemStatus};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_EMAIL_LEN: usize = 254;

fn invalid(msg: &str) -> Error {
    Error::InvalidArgument(msg.to_string())
}

/// Trim and lowercase an email, then check its shape.
///
/// Accepts `local@domain.tld`: one `@`, non-empty local part, a dotted
/// domain whose labels are non-empty, and no whitespace.
///
/// # Errors
///
/// Returns `InvalidArgument` if the address is malformed.
pub fn normalize_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid("Invalid email address"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid("Invalid email address"));
    };
    if local.is_empty() || domain.contains('@') {
        return Err(invalid("Invalid email address"));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid("Invalid email address"));
    }

    Ok(email)
}

/// # Errors
///
/// Returns `InvalidArgument` if the password is shorter than [`MIN_PASSWORD_LEN`].
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::InvalidArgument(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Trim a title and enforce presence and length.
///
/// # Errors
///
/// Returns `InvalidArgument` if the title is blank or too long.
pub fn normalize_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(invalid("Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::InvalidArgument(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

/// Blank descriptions are stored as NULL.
#[must_use]
pub fn normalize_description(raw: Option<String>) -> Option<String> {
    raw.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())
}

/// Trim an optional display name; blank becomes `None`.
#[must_use]
pub fn normalize_full_name(raw: Option<String>) -> Option<String> {
    normalize_description(raw)
}

/// # Errors
///
/// Returns `InvalidArgument("Invalid category")` for anything but the two wire values.
pub fn parse_category(raw: &str) -> Result<ItemCategory> {
    ItemCategory::parse(raw).ok_or_else(|| invalid("Invalid category"))
}

/// # Errors
///
/// Returns `InvalidArgument("Invalid status")` for values outside the fixed set.
pub fn parse_status(raw: &str) -> Result<ItemStatus> {
    ItemStatus::parse(raw).ok_or_else(|| invalid("Invalid status"))
}

/// Parse a positive item id from a path segment.
///
/// # Errors
///
/// Returns `InvalidArgument("Invalid item ID")` for non-numeric or non-positive input.
pub fn parse_item_id(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid("Invalid item ID")),
    }
}

/// Parse a four-digit calendar year from a path segment.
///
/// # Errors
///
/// Returns `InvalidArgument("Invalid year")` for anything outside 1000..=9999.
pub fn parse_year(raw: &str) -> Result<i32> {
    match raw.parse::<i32>() {
        Ok(year) if (1000..=9999).contains(&year) => Ok(year),
        _ => Err(invalid("Invalid year")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM ").unwrap(), "ada@example.com");
        assert!(normalize_email("ada.example.com").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ada@example").is_err());
        assert!(normalize_email("ada@.com").is_err());
        assert!(normalize_email("ada@@example.com").is_err());
        assert!(normalize_email("a da@example.com").is_err());
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());

        let err = validate_password("abc").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Learn to sail ").unwrap(), "Learn to sail");
        assert!(normalize_title("   ").is_err());
        assert!(normalize_title(&"x".repeat(MAX_TITLE_LEN + 1)).is_err());
        assert!(normalize_title(&"x".repeat(MAX_TITLE_LEN)).is_ok());
    }

    #[test]
    fn test_normalize_description() {
        assert_eq!(normalize_description(Some("  ".into())), None);
        assert_eq!(normalize_description(Some(" why ".into())), Some("why".into()));
        assert_eq!(normalize_description(None), None);
    }

    #[test]
    fn test_parse_category_and_status() {
        assert_eq!(parse_category("general").unwrap(), ItemCategory::General);
        assert_eq!(parse_category("someday").unwrap_err().to_string(), "Invalid category");
        assert_eq!(parse_status("maybe").unwrap(), ItemStatus::Maybe);
        assert_eq!(parse_status("done").unwrap_err().to_string(), "Invalid status");
    }

    #[test]
    fn test_parse_path_numbers() {
        assert_eq!(parse_item_id("42").unwrap(), 42);
        assert_eq!(parse_item_id("abc").unwrap_err().to_string(), "Invalid item ID");
        assert!(parse_item_id("0").is_err());
        assert!(parse_item_id("-3").is_err());

        assert_eq!(parse_year("2025").unwrap(), 2025);
        assert_eq!(parse_year("25").unwrap_err().to_string(), "Invalid year");
        assert!(parse_year("twenty").is_err());
    }
}
