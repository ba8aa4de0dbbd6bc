//! SQLite storage implementation.
//!
//! Every item query is scoped by `user_id`. Multi-statement writes go
//! through [`SqliteStorage::mutate`], which wraps them in one IMMEDIATE
//! transaction and writes the audit events before commit.

use crate::error::{Error, Result};
use crate::model::{
    BucketItem, FieldUpdate, ItemCategory, ItemPatch, ItemStatus, NewItem, PriorityUpdate, User,
};
use crate::storage::events::{insert_event, Event, EventType};
use crate::storage::schema::{apply_schema, configure_connection};
use chrono::{DateTime, Datelike, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Default busy timeout for every connection.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

const ITEM_COLUMNS: &str = "id, user_id, title, description, category, status, priority, \
     completed, completed_at, archived, archived_year, goal_year, created_at, updated_at";

const USER_COLUMNS: &str = "id, email, password_hash, full_name, created_at";

/// Archive completed current-year items whose goal year has passed.
///
/// ?1 user, ?2 previous year, ?3 now (ms), ?4 current year. The second
/// disjunct never matches anything the first one misses.
const ARCHIVE_SQL: &str = "
    UPDATE bucket_items
    SET archived = 1, archived_year = ?2, updated_at = ?3
    WHERE user_id = ?1
      AND archived = 0
      AND category = 'upcoming_year'
      AND completed = 1
      AND (
        goal_year < ?4
        OR (
          goal_year = ?2
          AND completed_at IS NOT NULL
          AND CAST(strftime('%Y', completed_at / 1000, 'unixepoch') AS INTEGER) < ?4
        )
      )";

/// Carry current-year goals forward into the new year.
///
/// ?1 user, ?2 current year, ?3 now (ms). Applies to every unarchived
/// upcoming-year item, completed or not; callers that archive must do so
/// first.
const REFRESH_GOAL_YEAR_SQL: &str = "
    UPDATE bucket_items
    SET goal_year = ?2, updated_at = ?3
    WHERE user_id = ?1
      AND archived = 0
      AND category = 'upcoming_year'
      AND (goal_year IS NULL OR goal_year < ?2)";

impl FromSql for ItemCategory {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Self::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown category: {s}").into()))
    }
}

impl FromSql for ItemStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Self::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown status: {s}").into()))
    }
}

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

/// Context for a mutation operation.
///
/// Passed to mutation closures to collect audit events, which are
/// written in the same transaction just before commit.
pub struct MutationContext {
    /// Name of the operation being performed.
    pub op_name: String,
    /// Acting user id.
    pub actor: i64,
    /// Mutation timestamp (Unix milliseconds).
    pub now: i64,
    /// Events to write at the end of the transaction.
    pub events: Vec<Event>,
}

impl MutationContext {
    /// Create a new mutation context.
    #[must_use]
    pub fn new(op_name: &str, actor: i64, now: i64) -> Self {
        Self {
            op_name: op_name.to_string(),
            actor,
            now,
            events: Vec::new(),
        }
    }

    /// Record an event for this operation.
    pub fn record_event(&mut self, entity_type: &str, entity_id: &str, event_type: EventType) {
        self.events
            .push(Event::new(entity_type, entity_id, event_type, self.actor).at(self.now));
    }

    /// Record an event with old/new values for field tracking.
    pub fn record_change(
        &mut self,
        entity_type: &str,
        entity_id: &str,
        event_type: EventType,
        old_value: Option<String>,
        new_value: Option<String>,
    ) {
        self.events.push(
            Event::new(entity_type, entity_id, event_type, self.actor)
                .with_values(old_value, new_value)
                .at(self.now),
        );
    }
}

/// Counts from one yearly archive transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ArchiveOutcome {
    /// Items moved into the archive.
    pub archived: usize,
    /// Items whose goal year was carried forward.
    pub refreshed: usize,
}

impl SqliteStorage {
    /// Open a database at the given path.
    ///
    /// Creates the database and applies schema if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open a database with an optional busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open_with_timeout(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        let storage = Self::connect(path, timeout_ms)?;
        apply_schema(&storage.conn)?;
        Ok(storage)
    }

    /// Open a connection to a database whose schema is already in place.
    ///
    /// Only sets pragmas and the busy timeout. Used for the second and
    /// later connections of a pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn connect(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_millis(
            timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
        ))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection (for read operations).
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Recorded schema versions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn applied_migrations(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY applied_at, version")?;
        let versions = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(versions)
    }

    /// Execute a mutation with the transaction protocol.
    ///
    /// 1. Begins an IMMEDIATE transaction (takes the write lock up front)
    /// 2. Executes the mutation closure
    /// 3. Writes audit events
    /// 4. Commits
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails. The transaction is rolled back
    /// when it is dropped without commit, so a failing closure leaves no
    /// partial writes behind.
    pub fn mutate<F, R>(&mut self, op: &str, actor: i64, now: i64, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction, &mut MutationContext) -> Result<R>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

        let mut ctx = MutationContext::new(op, actor, now);

        let result = f(&tx, &mut ctx)?;

        for event in &ctx.events {
            insert_event(&tx, event)?;
        }

        tx.commit()?;
        debug!(op, actor = ctx.actor, events = ctx.events.len(), "Mutation committed");

        Ok(result)
    }

    // ==================
    // User Operations
    // ==================

    /// Create a user. `email` must already be normalized.
    ///
    /// # Errors
    ///
    /// Returns `EmailTaken` if the address is registered (case-insensitive).
    pub fn create_user(
        &mut self,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<User> {
        let now_ms = now.timestamp_millis();

        self.mutate("create_user", 0, now_ms, |tx, ctx| {
            let taken = tx
                .prepare("SELECT 1 FROM users WHERE email = ?1")?
                .exists([email])?;
            if taken {
                return Err(Error::EmailTaken {
                    email: email.to_string(),
                });
            }

            tx.execute(
                "INSERT INTO users (email, password_hash, full_name, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![email, password_hash, full_name, now_ms],
            )
            .map_err(|e| map_unique_email(e, email))?;

            let id = tx.last_insert_rowid();
            ctx.actor = id;
            ctx.record_event("user", &id.to_string(), EventType::UserCreated);

            Ok(User {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                full_name: full_name.map(ToString::to_string),
                created_at: now_ms,
            })
        })
    }

    /// Look up a user by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
        Ok(self
            .conn
            .query_row(&sql, [email], map_user_row)
            .optional()?)
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
        Ok(self.conn.query_row(&sql, [id], map_user_row).optional()?)
    }

    // ==================
    // Item Operations
    // ==================

    /// Active (non-archived) items: incomplete first, then priority
    /// ascending, then newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_items(&self, user_id: i64) -> Result<Vec<BucketItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM bucket_items
             WHERE user_id = ?1 AND archived = 0
             ORDER BY completed ASC, priority ASC, created_at DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([user_id], map_item_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Active items of one category, in the same order as [`Self::list_items`].
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_items_by_category(
        &self,
        user_id: i64,
        category: ItemCategory,
    ) -> Result<Vec<BucketItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM bucket_items
             WHERE user_id = ?1 AND category = ?2 AND archived = 0
             ORDER BY completed ASC, priority ASC, created_at DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params![user_id, category.as_str()], map_item_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Fetch one item owned by `user_id`, archived or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_item(&self, user_id: i64, id: i64) -> Result<Option<BucketItem>> {
        Ok(fetch_item(&self.conn, user_id, id)?)
    }

    /// Create an item.
    ///
    /// Without an explicit priority the item goes one past the current
    /// maximum of its category. `upcoming_year` items default their goal
    /// year to the year of `now`; `general` items never carry one.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_item(
        &mut self,
        user_id: i64,
        item: &NewItem,
        now: DateTime<Utc>,
    ) -> Result<BucketItem> {
        let now_ms = now.timestamp_millis();
        let goal_year = match item.category {
            ItemCategory::UpcomingYear => Some(item.goal_year.unwrap_or_else(|| now.year())),
            ItemCategory::General => None,
        };

        self.mutate("create_item", user_id, now_ms, |tx, ctx| {
            let priority: i64 = match item.priority {
                Some(p) => p,
                None => tx.query_row(
                    "SELECT COALESCE(MAX(priority), 0) + 1 FROM bucket_items
                     WHERE user_id = ?1 AND category = ?2",
                    rusqlite::params![user_id, item.category.as_str()],
                    |row| row.get(0),
                )?,
            };

            tx.execute(
                "INSERT INTO bucket_items
                    (user_id, title, description, category, status, priority,
                     completed, completed_at, archived, archived_year, goal_year,
                     created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, NULL, 0, NULL, ?7, ?8, ?8)",
                rusqlite::params![
                    user_id,
                    item.title,
                    item.description,
                    item.category.as_str(),
                    item.status.as_str(),
                    priority,
                    goal_year,
                    now_ms,
                ],
            )?;

            let id = tx.last_insert_rowid();
            ctx.record_event("item", &id.to_string(), EventType::ItemCreated);

            fetch_item(tx, user_id, id)?.ok_or(Error::ItemNotFound { id })
        })
    }

    /// Apply a partial update in a single statement.
    ///
    /// Completing stamps `completed_at`; reopening clears it. Setting the
    /// category to `upcoming_year` stamps the current year as goal year,
    /// setting it to `general` clears the goal year. An empty patch returns
    /// the item unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if no item with this id belongs to the user.
    pub fn update_item(
        &mut self,
        user_id: i64,
        id: i64,
        patch: &ItemPatch,
        now: DateTime<Utc>,
    ) -> Result<BucketItem> {
        if patch.is_empty() {
            return self.get_item(user_id, id)?.ok_or(Error::ItemNotFound { id });
        }

        let now_ms = now.timestamp_millis();

        // Build dynamic UPDATE query based on provided fields
        let mut set_clauses = vec!["updated_at = ?"];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(now_ms)];
        let mut changed = Vec::new();

        for update in patch.iter() {
            match update {
                FieldUpdate::Title(title) => {
                    set_clauses.push("title = ?");
                    params.push(Box::new(title.clone()));
                    changed.push("title");
                }
                FieldUpdate::Description(description) => {
                    set_clauses.push("description = ?");
                    params.push(Box::new(description.clone()));
                    changed.push("description");
                }
                FieldUpdate::Category(category) => {
                    set_clauses.push("category = ?");
                    params.push(Box::new(category.as_str()));
                    set_clauses.push("goal_year = ?");
                    params.push(Box::new(match category {
                        ItemCategory::UpcomingYear => Some(now.year()),
                        ItemCategory::General => None,
                    }));
                    changed.push("category");
                }
                FieldUpdate::Status(status) => {
                    set_clauses.push("status = ?");
                    params.push(Box::new(status.as_str()));
                    changed.push("status");
                }
                FieldUpdate::Priority(priority) => {
                    set_clauses.push("priority = ?");
                    params.push(Box::new(*priority));
                    changed.push("priority");
                }
                FieldUpdate::Completed(done) => {
                    set_clauses.push("completed = ?");
                    params.push(Box::new(*done));
                    set_clauses.push("completed_at = ?");
                    params.push(Box::new(done.then_some(now_ms)));
                    changed.push("completed");
                }
            }
        }

        let sql = format!(
            "UPDATE bucket_items SET {} WHERE id = ? AND user_id = ?",
            set_clauses.join(", ")
        );
        params.push(Box::new(id));
        params.push(Box::new(user_id));

        let event_type = match patch.completion() {
            Some(true) => EventType::ItemCompleted,
            Some(false) => EventType::ItemReopened,
            None => EventType::ItemUpdated,
        };

        self.mutate("update_item", user_id, now_ms, |tx, ctx| {
            let rows = tx.execute(&sql, rusqlite::params_from_iter(params.iter()))?;
            if rows == 0 {
                return Err(Error::ItemNotFound { id });
            }

            ctx.record_change("item", &id.to_string(), event_type, None, Some(changed.join(",")));

            fetch_item(tx, user_id, id)?.ok_or(Error::ItemNotFound { id })
        })
    }

    /// Hard-delete an item.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if no item with this id belongs to the user.
    pub fn delete_item(&mut self, user_id: i64, id: i64, now: DateTime<Utc>) -> Result<()> {
        self.mutate("delete_item", user_id, now.timestamp_millis(), |tx, ctx| {
            let rows = tx.execute(
                "DELETE FROM bucket_items WHERE id = ?1 AND user_id = ?2",
                rusqlite::params![id, user_id],
            )?;
            if rows == 0 {
                return Err(Error::ItemNotFound { id });
            }

            ctx.record_event("item", &id.to_string(), EventType::ItemDeleted);
            Ok(())
        })
    }

    /// Apply a batch of priority changes all-or-nothing.
    ///
    /// Priorities are taken as given; no contiguity or uniqueness check.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` for the first id the user does not own; the
    /// whole batch is rolled back. Any database failure also rolls back.
    pub fn reorder_items(
        &mut self,
        user_id: i64,
        updates: &[PriorityUpdate],
        now: DateTime<Utc>,
    ) -> Result<usize> {
        if updates.is_empty() {
            return Ok(0);
        }

        let now_ms = now.timestamp_millis();
        self.mutate("reorder_items", user_id, now_ms, |tx, ctx| {
            let mut stmt = tx.prepare(
                "UPDATE bucket_items SET priority = ?1, updated_at = ?2
                 WHERE id = ?3 AND user_id = ?4",
            )?;

            for update in updates {
                let rows =
                    stmt.execute(rusqlite::params![update.priority, now_ms, update.id, user_id])?;
                if rows == 0 {
                    return Err(Error::ItemNotFound { id: update.id });
                }
            }

            ctx.record_change(
                "user",
                &user_id.to_string(),
                EventType::ItemsReordered,
                None,
                Some(updates.len().to_string()),
            );
            Ok(updates.len())
        })
    }

    // ==================
    // Archive Operations
    // ==================

    /// Archived items, newest archive year first, then latest completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_archived(&self, user_id: i64) -> Result<Vec<BucketItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM bucket_items
             WHERE user_id = ?1 AND archived = 1
             ORDER BY archived_year DESC, completed_at DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([user_id], map_item_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Items archived for one year, latest completion first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_archived_by_year(&self, user_id: i64, year: i32) -> Result<Vec<BucketItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM bucket_items
             WHERE user_id = ?1 AND archived = 1 AND archived_year = ?2
             ORDER BY completed_at DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params![user_id, year], map_item_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Move completed current-year items from past years into the archive.
    ///
    /// Archived items get the year before `now` as their archive year.
    /// Safe to repeat: already-archived items are never touched again.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn archive_previous_year(&mut self, user_id: i64, now: DateTime<Utc>) -> Result<usize> {
        let current_year = now.year();
        self.mutate("archive_previous_year", user_id, now.timestamp_millis(), |tx, ctx| {
            let archived = archive_completed(tx, user_id, current_year, ctx.now)?;
            if archived > 0 {
                record_archive_event(ctx, user_id, current_year - 1, archived);
            }
            Ok(archived)
        })
    }

    /// Stamp the current year on current-year goals that still point at
    /// an earlier year (or none).
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn refresh_goal_years(&mut self, user_id: i64, now: DateTime<Utc>) -> Result<usize> {
        let current_year = now.year();
        self.mutate("refresh_goal_years", user_id, now.timestamp_millis(), |tx, ctx| {
            let refreshed = refresh_goal_years(tx, user_id, current_year, ctx.now)?;
            if refreshed > 0 {
                record_refresh_event(ctx, user_id, current_year, refreshed);
            }
            Ok(refreshed)
        })
    }

    /// Archive then refresh, in one transaction.
    ///
    /// Archiving first lets completed items from last year leave the active
    /// list before incomplete ones are carried into the new year.
    ///
    /// # Errors
    ///
    /// Returns an error if either step fails; neither step is then applied.
    pub fn run_archive_transition(
        &mut self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<ArchiveOutcome> {
        let current_year = now.year();
        let outcome =
            self.mutate("archive_transition", user_id, now.timestamp_millis(), |tx, ctx| {
                let archived = archive_completed(tx, user_id, current_year, ctx.now)?;
                let refreshed = refresh_goal_years(tx, user_id, current_year, ctx.now)?;

                if archived > 0 {
                    record_archive_event(ctx, user_id, current_year - 1, archived);
                }
                if refreshed > 0 {
                    record_refresh_event(ctx, user_id, current_year, refreshed);
                }

                Ok(ArchiveOutcome { archived, refreshed })
            })?;

        if outcome.archived > 0 || outcome.refreshed > 0 {
            info!(
                user_id,
                archived = outcome.archived,
                refreshed = outcome.refreshed,
                year = current_year,
                "Archive transition applied"
            );
        }
        Ok(outcome)
    }
}

// ==================
// Helpers
// ==================

fn archive_completed(
    conn: &Connection,
    user_id: i64,
    current_year: i32,
    now_ms: i64,
) -> rusqlite::Result<usize> {
    conn.execute(
        ARCHIVE_SQL,
        rusqlite::params![user_id, current_year - 1, now_ms, current_year],
    )
}

fn refresh_goal_years(
    conn: &Connection,
    user_id: i64,
    current_year: i32,
    now_ms: i64,
) -> rusqlite::Result<usize> {
    conn.execute(
        REFRESH_GOAL_YEAR_SQL,
        rusqlite::params![user_id, current_year, now_ms],
    )
}

fn record_archive_event(ctx: &mut MutationContext, user_id: i64, year: i32, count: usize) {
    ctx.record_change(
        "user",
        &user_id.to_string(),
        EventType::ItemsArchived,
        Some(year.to_string()),
        Some(count.to_string()),
    );
}

fn record_refresh_event(ctx: &mut MutationContext, user_id: i64, year: i32, count: usize) {
    ctx.record_change(
        "user",
        &user_id.to_string(),
        EventType::GoalYearsRefreshed,
        Some(year.to_string()),
        Some(count.to_string()),
    );
}

fn fetch_item(conn: &Connection, user_id: i64, id: i64) -> rusqlite::Result<Option<BucketItem>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM bucket_items WHERE id = ?1 AND user_id = ?2");
    conn.query_row(&sql, rusqlite::params![id, user_id], map_item_row)
        .optional()
}

fn map_unique_email(err: rusqlite::Error, email: &str) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::EmailTaken {
                email: email.to_string(),
            }
        }
        other => other.into(),
    }
}

fn map_item_row(row: &rusqlite::Row) -> rusqlite::Result<BucketItem> {
    Ok(BucketItem {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        status: row.get(5)?,
        priority: row.get(6)?,
        completed: row.get(7)?,
        completed_at: row.get(8)?,
        archived: row.get(9)?,
        archived_year: row.get(10)?,
        goal_year: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

fn map_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        full_name: row.get(3)?,
        created_at: row.get(4)?,
    })
}
