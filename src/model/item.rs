//! Bucket list item model.
//!
//! Items belong to exactly one user. `upcoming_year` items carry the goal
//! year they were planned for; `general` items never do.

use serde::{Deserialize, Serialize};

/// Item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Goals for the current calendar year.
    UpcomingYear,
    /// Someday goals with no target year.
    General,
}

impl ItemCategory {
    /// Get the string representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpcomingYear => "upcoming_year",
            Self::General => "general",
        }
    }

    /// Parse the wire/storage form. Matching is exact.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upcoming_year" => Some(Self::UpcomingYear),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Active,
    InProgress,
    Postponed,
    Maybe,
    Completed,
}

impl ItemStatus {
    pub const ALL: [Self; 5] = [
        Self::Active,
        Self::InProgress,
        Self::Postponed,
        Self::Maybe,
        Self::Completed,
    ];

    /// Get the string representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InProgress => "in_progress",
            Self::Postponed => "postponed",
            Self::Maybe => "maybe",
            Self::Completed => "completed",
        }
    }

    /// Parse the wire/storage form. Matching is exact.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// A stored bucket list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketItem {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub status: ItemStatus,

    /// Lower sorts first; duplicates are tolerated.
    pub priority: i64,

    pub completed: bool,

    /// Completion timestamp (Unix milliseconds)
    pub completed_at: Option<i64>,

    pub archived: bool,
    pub archived_year: Option<i32>,

    /// Planned year for `upcoming_year` items.
    pub goal_year: Option<i32>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

/// Fields for a new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub status: ItemStatus,
    /// `None` appends after the current maximum in the category.
    pub priority: Option<i64>,
    /// Ignored for `general` items.
    pub goal_year: Option<i32>,
}

impl NewItem {
    #[must_use]
    pub fn new(title: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            title: title.into(),
            description: None,
            category,
            status: ItemStatus::default(),
            priority: None,
            goal_year: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_goal_year(mut self, year: i32) -> Self {
        self.goal_year = Some(year);
        self
    }
}

/// One field change within a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    /// `None` clears the description.
    Description(Option<String>),
    Category(ItemCategory),
    Status(ItemStatus),
    Priority(i64),
    Completed(bool),
}

/// A partial update: only the listed fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    updates: Vec<FieldUpdate>,
}

impl ItemPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(self, title: impl Into<String>) -> Self {
        self.with(FieldUpdate::Title(title.into()))
    }

    #[must_use]
    pub fn description(self, description: Option<String>) -> Self {
        self.with(FieldUpdate::Description(description))
    }

    #[must_use]
    pub fn category(self, category: ItemCategory) -> Self {
        self.with(FieldUpdate::Category(category))
    }

    #[must_use]
    pub fn status(self, status: ItemStatus) -> Self {
        self.with(FieldUpdate::Status(status))
    }

    #[must_use]
    pub fn priority(self, priority: i64) -> Self {
        self.with(FieldUpdate::Priority(priority))
    }

    #[must_use]
    pub fn completed(self, completed: bool) -> Self {
        self.with(FieldUpdate::Completed(completed))
    }

    /// Append a field change. A later change to the same field wins.
    #[must_use]
    pub fn with(mut self, update: FieldUpdate) -> Self {
        self.updates
            .retain(|existing| std::mem::discriminant(existing) != std::mem::discriminant(&update));
        self.updates.push(update);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldUpdate> {
        self.updates.iter()
    }

    /// The completion toggle carried by this patch, if any.
    #[must_use]
    pub fn completion(&self) -> Option<bool> {
        self.updates.iter().find_map(|u| match u {
            FieldUpdate::Completed(done) => Some(*done),
            _ => None,
        })
    }
}

/// A single `{id, priority}` pair in a reorder batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityUpdate {
    pub id: i64,
    pub priority: i64,
}
