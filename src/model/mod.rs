//! Data models for the bucket list service.
//!
//! This module contains all domain models:
//! - BucketItem (with its category, status and update types)
//! - User

pub mod item;
pub mod user;

pub use item::{
    BucketItem, FieldUpdate, ItemCategory, ItemPatch, ItemStatus, NewItem, PriorityUpdate,
};
pub use user::{PublicUser, User};
