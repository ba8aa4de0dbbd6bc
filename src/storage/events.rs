//! Audit event storage and retrieval.
//!
//! Every mutation records who did what to which entity.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::{Connection, Result};

/// Event types for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    UserCreated,

    ItemCreated,
    ItemUpdated,
    ItemCompleted,
    ItemReopened,
    ItemDeleted,

    ItemsReordered,
    ItemsArchived,
    GoalYearsRefreshed,
}

impl EventType {
    const ALL: [Self; 9] = [
        Self::UserCreated,
        Self::ItemCreated,
        Self::ItemUpdated,
        Self::ItemCompleted,
        Self::ItemReopened,
        Self::ItemDeleted,
        Self::ItemsReordered,
        Self::ItemsArchived,
        Self::GoalYearsRefreshed,
    ];

    /// Get the string representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserCreated => "user_created",
            Self::ItemCreated => "item_created",
            Self::ItemUpdated => "item_updated",
            Self::ItemCompleted => "item_completed",
            Self::ItemReopened => "item_reopened",
            Self::ItemDeleted => "item_deleted",
            Self::ItemsReordered => "items_reordered",
            Self::ItemsArchived => "items_archived",
            Self::GoalYearsRefreshed => "goal_years_refreshed",
        }
    }

    /// Parse the stored form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl FromSql for EventType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Self::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown event type: {s}").into()))
    }
}

/// An audit event record.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: i64,
    pub entity_type: String,
    pub entity_id: String,
    pub event_type: EventType,
    /// Acting user id.
    pub actor: i64,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub created_at: i64,
}

impl Event {
    /// Create a new event (id will be assigned by database).
    #[must_use]
    pub fn new(entity_type: &str, entity_id: &str, event_type: EventType, actor: i64) -> Self {
        Self {
            id: 0,
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            event_type,
            actor,
            old_value: None,
            new_value: None,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Add old/new values for field change tracking.
    #[must_use]
    pub fn with_values(mut self, old: Option<String>, new: Option<String>) -> Self {
        self.old_value = old;
        self.new_value = new;
        self
    }

    /// Override the timestamp (mutations pass the request clock).
    #[must_use]
    pub fn at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Insert an event into the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_event(conn: &Connection, event: &Event) -> Result<i64> {
    conn.execute(
        "INSERT INTO events (entity_type, entity_id, event_type, actor, old_value, new_value, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            event.entity_type,
            event.entity_id,
            event.event_type.as_str(),
            event.actor,
            event.old_value,
            event.new_value,
            event.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Get events for an entity, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_events(
    conn: &Connection,
    entity_type: &str,
    entity_id: &str,
    limit: Option<u32>,
) -> Result<Vec<Event>> {
    let limit = limit.unwrap_or(100);
    let mut stmt = conn.prepare(
        "SELECT id, entity_type, entity_id, event_type, actor, old_value, new_value, created_at
         FROM events
         WHERE entity_type = ?1 AND entity_id = ?2
         ORDER BY created_at DESC, id DESC
         LIMIT ?3",
    )?;

    let rows = stmt.query_map(rusqlite::params![entity_type, entity_id, limit], |row| {
        Ok(Event {
            id: row.get(0)?,
            entity_type: row.get(1)?,
            entity_id: row.get(2)?,
            event_type: row.get(3)?,
            actor: row.get(4)?,
            old_value: row.get(5)?,
            new_value: row.get(6)?,
            created_at: row.get(7)?,
        })
    })?;

    rows.collect()
}

/// Count events of one type recorded by a user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_events(conn: &Connection, actor: i64, event_type: EventType) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM events WHERE actor = ?1 AND event_type = ?2",
        rusqlite::params![actor, event_type.as_str()],
        |row| row.get(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::apply_schema;

    #[test]
    fn test_event_insert_and_get() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        let event = Event::new("item", "12", EventType::ItemUpdated, 3)
            .with_values(None, Some("title,priority".to_string()));

        let id = insert_event(&conn, &event).unwrap();
        assert!(id > 0);

        let events = get_events(&conn, "item", "12", Some(10)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::ItemUpdated);
        assert_eq!(events[0].actor, 3);
        assert_eq!(events[0].new_value.as_deref(), Some("title,priority"));
    }

    #[test]
    fn test_event_type_round_trip_names() {
        for event_type in EventType::ALL {
            assert_eq!(EventType::parse(event_type.as_str()), Some(event_type));
        }
        assert_eq!(EventType::parse("session_created"), None);
    }

    #[test]
    fn test_count_events_by_actor() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        insert_event(&conn, &Event::new("item", "1", EventType::ItemCreated, 1)).unwrap();
        insert_event(&conn, &Event::new("item", "2", EventType::ItemCreated, 1)).unwrap();
        insert_event(&conn, &Event::new("item", "3", EventType::ItemCreated, 2)).unwrap();

        assert_eq!(count_events(&conn, 1, EventType::ItemCreated).unwrap(), 2);
        assert_eq!(count_events(&conn, 1, EventType::ItemDeleted).unwrap(), 0);
    }
}
