// dataset.rs — Dataset: the goal table plus its two owner indexes.
//
// Every mutation goes through this type so the indexes can never drift from
// the goal table:
//   - each id in `by_employee[e]` / `by_team[t]` names a goal whose
//     employee / team is `e` / `t`
//   - each goal appears in exactly one employee bucket and one team bucket
//   - empty buckets are removed
//
// Update and delete of an unknown id are no-ops that leave the dataset
// untouched.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::{Goal, GoalId, GoalStatus};
use crate::index::OwnerIndex;
use crate::query::OwnerKind;

/// The complete in-memory state: goals by id and the two owner indexes.
///
/// Serializes to the snapshot document layout:
/// `{"goals": {"<id>": {...}}, "team": {...}, "employee": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    goals: BTreeMap<GoalId, Goal>,

    #[serde(default, rename = "team")]
    by_team: OwnerIndex,

    #[serde(default, rename = "employee")]
    by_employee: OwnerIndex,

    /// Lower bound for the next id handed out. Never persisted; ids are
    /// only guaranteed unique within one process run.
    #[serde(skip)]
    next_id: GoalId,
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.goals == other.goals
            && self.by_team == other.by_team
            && self.by_employee == other.by_employee
    }
}

impl Eq for Dataset {}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a goal and register it in both indexes.
    ///
    /// Empty strings are valid for every field.
    pub fn create(&mut self, employee: &str, description: &str, team: &str) -> &Goal {
        let goal_id = self.allocate_id();
        let goal = Goal::new(goal_id, employee, description, team);

        self.by_employee.append(employee, goal_id);
        self.by_team.append(team, goal_id);
        tracing::debug!(goal_id, employee, team, "goal created");

        self.goals.entry(goal_id).or_insert(goal)
    }

    /// Set a goal's status. Returns `false` (and changes nothing) if the
    /// goal does not exist.
    pub fn update_status(&mut self, goal_id: GoalId, status: GoalStatus) -> bool {
        match self.goals.get_mut(&goal_id) {
            Some(goal) => {
                tracing::debug!(goal_id, from = %goal.status, to = %status, "goal status updated");
                goal.status = status;
                true
            }
            None => {
                tracing::debug!(goal_id, "update of unknown goal ignored");
                false
            }
        }
    }

    /// Remove a goal and its index entries. Returns the removed goal, or
    /// `None` (and changes nothing) if it does not exist.
    pub fn delete(&mut self, goal_id: GoalId) -> Option<Goal> {
        let Some(goal) = self.goals.remove(&goal_id) else {
            tracing::debug!(goal_id, "delete of unknown goal ignored");
            return None;
        };
        self.by_employee.remove(&goal.employee, goal_id);
        self.by_team.remove(&goal.team, goal_id);
        tracing::debug!(goal_id, employee = %goal.employee, team = %goal.team, "goal deleted");
        Some(goal)
    }

    pub fn get(&self, goal_id: GoalId) -> Option<&Goal> {
        self.goals.get(&goal_id)
    }

    /// All goals in id order.
    pub fn goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals.values()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// The index for the given owner kind.
    pub fn index(&self, kind: OwnerKind) -> &OwnerIndex {
        match kind {
            OwnerKind::Employee => &self.by_employee,
            OwnerKind::Team => &self.by_team,
        }
    }

    pub fn by_employee(&self) -> &OwnerIndex {
        &self.by_employee
    }

    pub fn by_team(&self) -> &OwnerIndex {
        &self.by_team
    }

    /// Drop empty buckets from both indexes. Returns how many were dropped.
    pub fn prune_empty_buckets(&mut self) -> usize {
        let mut dropped = 0;
        for kind in [OwnerKind::Employee, OwnerKind::Team] {
            let index = match kind {
                OwnerKind::Employee => &mut self.by_employee,
                OwnerKind::Team => &mut self.by_team,
            };
            for owner in index.prune_empty() {
                tracing::warn!(%kind, owner = %owner, "dropped empty index bucket");
                dropped += 1;
            }
        }
        dropped
    }

    /// Verify that both indexes agree with the goal table.
    pub fn check_consistency(&self) -> Result<(), GoalError> {
        for (id, goal) in &self.goals {
            if goal.goal_id != *id {
                return Err(GoalError::InconsistentSnapshot {
                    reason: format!("goal stored under key {} has goal_id {}", id, goal.goal_id),
                });
            }
        }

        for kind in [OwnerKind::Employee, OwnerKind::Team] {
            let mut seen: HashMap<GoalId, usize> = HashMap::new();

            for (owner, ids) in self.index(kind).iter() {
                if ids.is_empty() {
                    return Err(GoalError::InconsistentSnapshot {
                        reason: format!("{} `{}` has an empty bucket", kind, owner),
                    });
                }
                for id in ids {
                    let goal = self.goals.get(id).ok_or_else(|| GoalError::InconsistentSnapshot {
                        reason: format!("goal {} listed under {} `{}` does not exist", id, kind, owner),
                    })?;
                    if kind.owner_of(goal) != owner {
                        return Err(GoalError::InconsistentSnapshot {
                            reason: format!(
                                "goal {} listed under {} `{}` belongs to `{}`",
                                id,
                                kind,
                                owner,
                                kind.owner_of(goal)
                            ),
                        });
                    }
                    *seen.entry(*id).or_default() += 1;
                }
            }

            for id in self.goals.keys() {
                let count = seen.get(id).copied().unwrap_or(0);
                if count != 1 {
                    return Err(GoalError::InconsistentSnapshot {
                        reason: format!("goal {} appears {} times in the {} index", id, count, kind),
                    });
                }
            }
        }

        Ok(())
    }

    /// Next unused id: above every id ever handed out by this instance and
    /// above every id currently stored. Once the id space above is used
    /// up, falls back to the lowest free id.
    fn allocate_id(&mut self) -> GoalId {
        let floor = match self.goals.last_key_value() {
            Some((id, _)) => id.checked_add(1),
            None => Some(1),
        };
        let goal_id = match floor {
            Some(floor) if !self.goals.contains_key(&self.next_id.max(floor)) => {
                self.next_id.max(floor)
            }
            _ => self.lowest_free_id(),
        };
        self.next_id = goal_id.saturating_add(1);
        goal_id
    }

    fn lowest_free_id(&self) -> GoalId {
        let mut candidate: GoalId = 1;
        for id in self.goals.keys() {
            if *id > candidate {
                break;
            }
            if *id == candidate {
                candidate += 1;
            }
        }
        candidate
    }
}
