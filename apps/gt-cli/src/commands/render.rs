// render.rs — Text output for the interactive shell.
//
// Every function returns a String so the session can write it anywhere and
// tests can compare it directly. Colors are plain ANSI escapes, emitted only
// when enabled.

use gt_goal::{Goal, GoalId, GoalStatus, OwnerKind, StatusGroups};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";

/// Formats shell output, with or without color.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn status_color(status: GoalStatus) -> &'static str {
        match status {
            GoalStatus::NotStarted => GRAY,
            GoalStatus::InProgress => CYAN,
            GoalStatus::Completed => GREEN,
        }
    }

    /// Command overview shown at startup and by `help`.
    pub fn banner(&self) -> String {
        format!(
            "{}\n\
             - add \"Employee Name\" \"Goal Description\" \"Team Name\"\n\
             - list \"Employee Name\"\n\
             - update GoalId \"Status\"\n\
             - delete GoalId\n\
             - summary \"Team Name\"\n\
             \n\
             Statuses: Not Started, In Progress, Completed\n\
             To exit press enter without any input.\n",
            self.paint(BOLD, "Command Options")
        )
    }

    /// `list <employee>`: only non-empty groups, each item with id and team.
    pub fn employee_goals(&self, employee: &str, groups: Option<&StatusGroups<'_>>) -> String {
        let Some(groups) = groups else {
            return self.no_goals(OwnerKind::Employee, employee);
        };

        let mut out = String::new();
        for (status, goals) in groups.iter() {
            if goals.is_empty() {
                continue;
            }
            out.push_str(&self.header(status, ":"));
            for goal in goals {
                out.push_str(&format!("- ({}) {}, {}\n", goal.goal_id, goal.description, goal.team));
            }
        }
        out
    }

    /// `summary <team>`: every group, each item with its employee; empty
    /// groups show `N/A`.
    pub fn team_summary(&self, team: &str, groups: Option<&StatusGroups<'_>>) -> String {
        let Some(groups) = groups else {
            return self.no_goals(OwnerKind::Team, team);
        };

        let mut out = String::new();
        for (status, goals) in groups.iter() {
            out.push_str(&self.header(status, ""));
            if goals.is_empty() {
                out.push_str("- N/A\n");
            }
            for goal in goals {
                out.push_str(&format!("- {}, {}\n", goal.description, goal.employee));
            }
        }
        out
    }

    fn header(&self, status: GoalStatus, suffix: &str) -> String {
        let title = format!("{}{}", status.name(), suffix);
        format!("{}\n", self.paint(Self::status_color(status), &title))
    }

    fn no_goals(&self, kind: OwnerKind, owner: &str) -> String {
        format!("No goals for {}: `{}`\n", kind, owner)
    }

    pub fn added(&self, goal: &Goal) -> String {
        format!(
            "Added goal {} for {} ({})\n",
            self.paint(BOLD, &goal.goal_id.to_string()),
            goal.employee,
            goal.team
        )
    }

    pub fn updated(&self, goal: &Goal) -> String {
        format!(
            "Goal {} is now {}\n",
            goal.goal_id,
            self.paint(Self::status_color(goal.status), goal.status.label())
        )
    }

    pub fn deleted(&self, goal: &Goal) -> String {
        format!("Deleted goal {} ({})\n", goal.goal_id, goal.description)
    }

    pub fn not_found(&self, goal_id: GoalId) -> String {
        format!("No goal with id {}; nothing changed\n", goal_id)
    }

    pub fn too_many_arguments(&self, line: &str) -> String {
        self.paint(
            RED,
            &format!("Received too many arguments `{}`.\nIgnoring last command.", line),
        ) + "\n"
    }

    pub fn invalid(&self, message: &str) -> String {
        format!(
            "{}\nType `help` for the list of commands.\n",
            self.paint(RED, message)
        )
    }
}
