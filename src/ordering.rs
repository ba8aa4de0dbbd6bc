//! Reorder and move planning for drag-and-drop clients.
//!
//! A client holds the list returned by the API, lets the user drag an
//! incomplete item, and then needs the `{id, priority}` batch to send to
//! the reorder endpoint. These functions compute that batch. Priorities
//! are renumbered contiguously from zero within each affected category.
//! Completed and archived items are never dragged or renumbered.

use crate::model::{BucketItem, ItemCategory, PriorityUpdate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of moving an item into another category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovePlan {
    /// The moved item.
    pub item_id: i64,
    /// Its new category, to send as a partial update first.
    pub category: ItemCategory,
    /// Renumbered priorities for the source and target categories.
    pub priorities: Vec<PriorityUpdate>,
}

/// Archived items of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveYear {
    pub year: i32,
    pub items: Vec<BucketItem>,
}

fn is_draggable(item: &BucketItem) -> bool {
    !item.completed && !item.archived
}

/// Draggable items of a category in display order.
fn draggable_lane(items: &[BucketItem], category: ItemCategory) -> Vec<&BucketItem> {
    let mut lane: Vec<&BucketItem> = items
        .iter()
        .filter(|item| item.category == category && is_draggable(item))
        .collect();
    // Stable: equal priorities keep the order the server returned.
    lane.sort_by_key(|item| item.priority);
    lane
}

fn renumber<'a>(lane: &'a [&'a BucketItem]) -> impl Iterator<Item = PriorityUpdate> + 'a {
    lane.iter().zip(0_i64..).map(|(item, priority)| PriorityUpdate {
        id: item.id,
        priority,
    })
}

fn position(lane: &[&BucketItem], id: i64) -> Option<usize> {
    lane.iter().position(|item| item.id == id)
}

/// Move `active_id` to the slot of `over_id` within one category.
///
/// Returns `None` when either id is unknown or not draggable, when they
/// sit in different categories, or when the item is dropped on itself.
#[must_use]
pub fn move_within(items: &[BucketItem], active_id: i64, over_id: i64) -> Option<Vec<PriorityUpdate>> {
    if active_id == over_id {
        return None;
    }

    let active = items.iter().find(|i| i.id == active_id && is_draggable(i))?;
    let mut lane = draggable_lane(items, active.category);

    let from = position(&lane, active_id)?;
    let to = position(&lane, over_id)?;

    let moved = lane.remove(from);
    lane.insert(to, moved);

    Some(renumber(&lane).collect())
}

/// Move `active_id` into `target`, before `over_id` or at the end.
///
/// `over_id = None` means the item was dropped on the category zone
/// itself. Returns `None` when the item is unknown or not draggable, when
/// it already belongs to `target`, or when `over_id` is not a draggable
/// item of `target`.
#[must_use]
pub fn move_to_category(
    items: &[BucketItem],
    active_id: i64,
    target: ItemCategory,
    over_id: Option<i64>,
) -> Option<MovePlan> {
    let active = items.iter().find(|i| i.id == active_id && is_draggable(i))?;
    if active.category == target {
        return None;
    }

    let mut source = draggable_lane(items, active.category);
    source.retain(|item| item.id != active_id);

    let mut destination = draggable_lane(items, target);
    let at = match over_id {
        Some(over) => position(&destination, over)?,
        None => destination.len(),
    };
    destination.insert(at, active);

    let priorities = renumber(&source).chain(renumber(&destination)).collect();

    Some(MovePlan {
        item_id: active_id,
        category: target,
        priorities,
    })
}

/// Group archived items by archive year, newest year first.
///
/// Items keep their relative order within a year. Items that are not
/// archived, or lack an archive year, are skipped.
#[must_use]
pub fn group_archive_by_year(items: &[BucketItem]) -> Vec<ArchiveYear> {
    let mut years: BTreeMap<i32, Vec<BucketItem>> = BTreeMap::new();
    for item in items.iter().filter(|i| i.archived) {
        if let Some(year) = item.archived_year {
            years.entry(year).or_default().push(item.clone());
        }
    }

    years
        .into_iter()
        .rev()
        .map(|(year, items)| ArchiveYear { year, items })
        .collect()
}
