// index.rs — OwnerIndex: owner name → ordered goal ids.
//
// The dataset keeps two of these, one keyed by employee and one by team.
// A bucket only exists while it holds at least one id; reads of an absent
// owner see an empty bucket rather than an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::goal::GoalId;

/// Secondary index from an owner name to the ids of its goals, in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerIndex {
    buckets: BTreeMap<String, Vec<GoalId>>,
}

impl OwnerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bucket for `owner`, or an empty slice if the owner has none.
    pub fn get_or_empty(&self, owner: &str) -> &[GoalId] {
        self.buckets.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The bucket for `owner`, if one exists.
    pub fn bucket(&self, owner: &str) -> Option<&[GoalId]> {
        self.buckets.get(owner).map(Vec::as_slice)
    }

    pub fn contains_owner(&self, owner: &str) -> bool {
        self.buckets.contains_key(owner)
    }

    /// Append `goal_id` to the owner's bucket, creating it if needed.
    pub fn append(&mut self, owner: &str, goal_id: GoalId) {
        self.buckets.entry(owner.to_string()).or_default().push(goal_id);
    }

    /// Remove `goal_id` from the owner's bucket, dropping the bucket once
    /// it is empty. Returns whether the id was present.
    pub fn remove(&mut self, owner: &str, goal_id: GoalId) -> bool {
        let Some(bucket) = self.buckets.get_mut(owner) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|id| *id == goal_id) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(owner);
        }
        true
    }

    /// Drop any empty buckets. Returns the owners that were removed.
    pub fn prune_empty(&mut self) -> Vec<String> {
        let empty: Vec<String> = self
            .buckets
            .iter()
            .filter(|(_, ids)| ids.is_empty())
            .map(|(owner, _)| owner.clone())
            .collect();
        for owner in &empty {
            self.buckets.remove(owner);
        }
        empty
    }

    /// Iterate over `(owner, bucket)` pairs in owner-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GoalId])> {
        self.buckets
            .iter()
            .map(|(owner, ids)| (owner.as_str(), ids.as_slice()))
    }

    /// Number of owners with a bucket.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
