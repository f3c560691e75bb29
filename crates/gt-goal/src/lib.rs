//! # gt-goal
//!
//! Goal records, owner indexes, and snapshot storage for the goal tracker.
//!
//! A [`Goal`] is one performance objective owned by an employee and
//! reported under a team. The [`Dataset`] holds every goal plus two
//! secondary indexes (by employee, by team) and is the only way to mutate
//! them, so the indexes always agree with the goal table.
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalStatus`] — the record and its three-valued status
//!   (Not Started → In Progress → Completed display order)
//! - [`normalize_status`] — free-text status parsing shared by the shell
//!   and the snapshot decoder
//! - [`OwnerIndex`] — owner name → ordered goal ids, no empty buckets
//! - [`Dataset`] — create / update-status / delete with index maintenance
//! - [`list_by_owner`] — an owner's goals grouped by status
//! - [`GoalStore`] — trait for loading/persisting the whole dataset, with
//!   [`JsonFileStore`] (one JSON document on disk) and [`MemoryStore`]

pub mod dataset;
pub mod error;
pub mod goal;
pub mod index;
pub mod query;
pub mod store;

pub use dataset::Dataset;
pub use error::GoalError;
pub use goal::{normalize_status, Goal, GoalId, GoalStatus};
pub use index::OwnerIndex;
pub use query::{list_by_owner, OwnerKind, StatusGroups};
pub use store::{decode_snapshot, encode_snapshot, GoalStore, JsonFileStore, MemoryStore};
