// goal.rs — Goal: one tracked performance objective, and its status.
//
// A Goal belongs to exactly one employee and one team. Everything except
// `status` is fixed at creation; status moves freely between the three
// values (there is no enforced transition graph).
//
// Status labels are persisted in their human-readable form ("In Progress"),
// and every label coming from outside (shell input or a snapshot) passes
// through the same normalization.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Identifier of a goal within a dataset.
pub type GoalId = u64;

/// The status of a goal.
///
/// Variant order is the canonical display order: NotStarted, InProgress,
/// Completed. `Ord` follows it, so sorting by status groups goals the way
/// the shell prints them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl GoalStatus {
    /// All statuses in display order.
    pub const ALL: [GoalStatus; 3] = [
        GoalStatus::NotStarted,
        GoalStatus::InProgress,
        GoalStatus::Completed,
    ];

    /// Human-readable label, also used in the snapshot.
    pub fn label(self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "Not Started",
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Completed => "Completed",
        }
    }

    /// Upper snake case name used for group headers (e.g. "IN_PROGRESS").
    pub fn name(self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "NOT_STARTED",
            GoalStatus::InProgress => "IN_PROGRESS",
            GoalStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a free-text status label to a [`GoalStatus`].
///
/// Matching ignores case, and spaces and underscores are interchangeable,
/// so "in progress", "In_Progress" and "IN PROGRESS" are all accepted.
/// Leading, trailing and repeated separators are ignored.
pub fn normalize_status(raw: &str) -> Result<GoalStatus, GoalError> {
    let key = raw
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase();

    GoalStatus::ALL
        .into_iter()
        .find(|status| status.name() == key)
        .ok_or_else(|| GoalError::InvalidStatus(raw.to_string()))
}

impl FromStr for GoalStatus {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_status(s)
    }
}

impl TryFrom<String> for GoalStatus {
    type Error = GoalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize_status(&value)
    }
}

impl From<GoalStatus> for String {
    fn from(status: GoalStatus) -> Self {
        status.label().to_string()
    }
}

/// A tracked performance goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier, stable for the goal's lifetime.
    pub goal_id: GoalId,

    /// The employee who owns this goal.
    pub employee: String,

    /// What the employee is aiming to achieve.
    pub description: String,

    /// The team the goal is reported under.
    pub team: String,

    /// When the goal was created.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    /// Current status.
    pub status: GoalStatus,
}

impl Goal {
    /// Create a new goal in the NotStarted state, stamped with the current time.
    pub fn new(
        goal_id: GoalId,
        employee: impl Into<String>,
        description: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        Self {
            goal_id,
            employee: employee.into(),
            description: description.into(),
            team: team.into(),
            created_at: Utc::now(),
            status: GoalStatus::NotStarted,
        }
    }
}

/// Serde adapter for `created_at`.
///
/// Writes RFC 3339. Reads RFC 3339, or the older naive
/// `YYYY-MM-DD HH:MM:SS[.ffffff]` form, which is taken as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const NAIVE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{}`", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_any_case() {
        assert_eq!(normalize_status("completed").unwrap(), GoalStatus::Completed);
        assert_eq!(normalize_status("Completed").unwrap(), GoalStatus::Completed);
        assert_eq!(normalize_status("COMPLETED").unwrap(), GoalStatus::Completed);
        assert_eq!(normalize_status("cOmPlEtEd").unwrap(), GoalStatus::Completed);
    }

    #[test]
    fn normalize_treats_spaces_and_underscores_alike() {
        assert_eq!(normalize_status("not started").unwrap(), GoalStatus::NotStarted);
        assert_eq!(normalize_status("NOT_STARTED").unwrap(), GoalStatus::NotStarted);
        assert_eq!(normalize_status("in Progress").unwrap(), GoalStatus::InProgress);
        assert_eq!(normalize_status("In_progress").unwrap(), GoalStatus::InProgress);
        assert_eq!(normalize_status("  in   progress ").unwrap(), GoalStatus::InProgress);
    }

    #[test]
    fn normalize_rejects_unknown_labels() {
        for raw in ["unknown", "", "done", "inprogress", "not-started"] {
            match normalize_status(raw) {
                Err(GoalError::InvalidStatus(text)) => assert_eq!(text, raw),
                other => panic!("expected InvalidStatus for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn status_order_is_display_order() {
        let mut statuses = vec![
            GoalStatus::Completed,
            GoalStatus::NotStarted,
            GoalStatus::InProgress,
        ];
        statuses.sort();
        assert_eq!(statuses, GoalStatus::ALL.to_vec());
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_string(&GoalStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let restored: GoalStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(restored, GoalStatus::InProgress);
        assert!(serde_json::from_str::<GoalStatus>("\"Blocked\"").is_err());
    }

    #[test]
    fn new_goal_starts_not_started() {
        let goal = Goal::new(1, "User", "Smth To Do", "Group");
        assert_eq!(goal.employee, "User");
        assert_eq!(goal.description, "Smth To Do");
        assert_eq!(goal.team, "Group");
        assert_eq!(goal.status, GoalStatus::NotStarted);
    }

    #[test]
    fn goal_serialization_round_trip() {
        let goal = Goal::new(7, "Alice", "Write spec", "Core");
        let json = serde_json::to_string_pretty(&goal).unwrap();
        assert!(json.contains("\"Not Started\""));
        let restored: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, goal);
    }

    #[test]
    fn legacy_naive_timestamp_is_accepted() {
        let json = r#"{
            "goal_id": 12,
            "description": "Goal description",
            "employee": "User",
            "team": "One",
            "created_at": "2025-12-19 19:30:21.048146",
            "status": "In Progress"
        }"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.goal_id, 12);
        assert_eq!(goal.status, GoalStatus::InProgress);
        assert_eq!(
            goal.created_at.to_rfc3339(),
            "2025-12-19T19:30:21.048146+00:00"
        );
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(timestamp::parse("yesterday").is_none());
    }
}
