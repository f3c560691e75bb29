// query.rs — Listing an owner's goals grouped by status.
//
// Used by both `list <employee>` and `summary <team>`. The result is plain
// data; rendering is up to the caller.

use std::fmt;

use crate::dataset::Dataset;
use crate::goal::{Goal, GoalStatus};

/// Which index an owner name is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    Employee,
    Team,
}

impl OwnerKind {
    /// The field of `goal` this kind indexes on.
    pub fn owner_of(self, goal: &Goal) -> &str {
        match self {
            OwnerKind::Employee => &goal.employee,
            OwnerKind::Team => &goal.team,
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerKind::Employee => write!(f, "employee"),
            OwnerKind::Team => write!(f, "team"),
        }
    }
}

/// An owner's goals split into one group per status.
///
/// Within a group, goals keep the order in which they were added to the
/// owner's bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusGroups<'a> {
    not_started: Vec<&'a Goal>,
    in_progress: Vec<&'a Goal>,
    completed: Vec<&'a Goal>,
}

impl<'a> StatusGroups<'a> {
    fn new() -> Self {
        Self {
            not_started: Vec::new(),
            in_progress: Vec::new(),
            completed: Vec::new(),
        }
    }

    fn push(&mut self, goal: &'a Goal) {
        self.group_mut(goal.status).push(goal);
    }

    fn group_mut(&mut self, status: GoalStatus) -> &mut Vec<&'a Goal> {
        match status {
            GoalStatus::NotStarted => &mut self.not_started,
            GoalStatus::InProgress => &mut self.in_progress,
            GoalStatus::Completed => &mut self.completed,
        }
    }

    /// The goals with the given status.
    pub fn group(&self, status: GoalStatus) -> &[&'a Goal] {
        match status {
            GoalStatus::NotStarted => &self.not_started,
            GoalStatus::InProgress => &self.in_progress,
            GoalStatus::Completed => &self.completed,
        }
    }

    /// Every group in display order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (GoalStatus, &[&'a Goal])> + '_ {
        GoalStatus::ALL
            .into_iter()
            .map(move |status| (status, self.group(status)))
    }

    /// Total number of goals across all groups.
    pub fn total(&self) -> usize {
        self.not_started.len() + self.in_progress.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// List an owner's goals grouped by status.
///
/// Returns `None` when the owner has no bucket in the index. Since empty
/// buckets are never kept, callers can treat `None` as "no goals".
pub fn list_by_owner<'a>(
    dataset: &'a Dataset,
    kind: OwnerKind,
    owner: &str,
) -> Option<StatusGroups<'a>> {
    let ids = dataset.index(kind).bucket(owner)?;

    let mut groups = StatusGroups::new();
    for id in ids {
        match dataset.get(*id) {
            Some(goal) => groups.push(goal),
            None => tracing::warn!(goal_id = *id, %kind, owner, "index entry without a goal"),
        }
    }
    Some(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_list_shows_goal_as_not_started() {
        let mut data = Dataset::new();
        let id = data.create("Alice", "Write spec", "Core").goal_id;

        let groups = list_by_owner(&data, OwnerKind::Employee, "Alice").unwrap();
        let not_started: Vec<_> = groups
            .group(GoalStatus::NotStarted)
            .iter()
            .map(|g| g.goal_id)
            .collect();
        assert_eq!(not_started, vec![id]);
        assert!(groups.group(GoalStatus::InProgress).is_empty());
        assert!(groups.group(GoalStatus::Completed).is_empty());
        assert_eq!(groups.total(), 1);
    }

    #[test]
    fn unknown_owner_is_none() {
        let mut data = Dataset::new();
        data.create("Alice", "Write spec", "Core");

        assert!(list_by_owner(&data, OwnerKind::Employee, "Bob").is_none());
        assert!(list_by_owner(&data, OwnerKind::Team, "Alice").is_none());
        assert!(list_by_owner(&Dataset::new(), OwnerKind::Team, "Core").is_none());
    }

    #[test]
    fn owner_is_none_after_last_goal_deleted() {
        let mut data = Dataset::new();
        let id = data.create("Alice", "Write spec", "Core").goal_id;
        data.delete(id);
        assert!(list_by_owner(&data, OwnerKind::Employee, "Alice").is_none());
        assert!(list_by_owner(&data, OwnerKind::Team, "Core").is_none());
    }

    #[test]
    fn groups_follow_display_order_not_insertion_order() {
        let mut data = Dataset::new();
        let done = data.create("A", "done", "One").goal_id;
        let todo = data.create("B", "todo", "One").goal_id;
        let doing = data.create("C", "doing", "One").goal_id;
        data.update_status(done, GoalStatus::Completed);
        data.update_status(doing, GoalStatus::InProgress);

        let groups = list_by_owner(&data, OwnerKind::Team, "One").unwrap();
        let layout: Vec<(GoalStatus, Vec<u64>)> = groups
            .iter()
            .map(|(status, goals)| (status, goals.iter().map(|g| g.goal_id).collect()))
            .collect();

        assert_eq!(
            layout,
            vec![
                (GoalStatus::NotStarted, vec![todo]),
                (GoalStatus::InProgress, vec![doing]),
                (GoalStatus::Completed, vec![done]),
            ]
        );
    }

    #[test]
    fn insertion_order_kept_within_a_group() {
        let mut data = Dataset::new();
        let first = data.create("Alice", "first", "Core").goal_id;
        let middle = data.create("Alice", "middle", "Core").goal_id;
        let last = data.create("Alice", "last", "Core").goal_id;
        data.update_status(middle, GoalStatus::Completed);

        let groups = list_by_owner(&data, OwnerKind::Employee, "Alice").unwrap();
        let ids: Vec<_> = groups
            .group(GoalStatus::NotStarted)
            .iter()
            .map(|g| g.goal_id)
            .collect();
        assert_eq!(ids, vec![first, last]);
    }

    #[test]
    fn employee_and_team_views_differ() {
        let mut data = Dataset::new();
        data.create("Alice", "a", "Core");
        data.create("Bob", "b", "Core");
        data.create("Alice", "c", "Edge");

        assert_eq!(list_by_owner(&data, OwnerKind::Employee, "Alice").unwrap().total(), 2);
        assert_eq!(list_by_owner(&data, OwnerKind::Team, "Core").unwrap().total(), 2);
        assert_eq!(list_by_owner(&data, OwnerKind::Team, "Edge").unwrap().total(), 1);
    }
}
