// line.rs — Turning one line of shell input into a ShellCommand.
//
// Input is split shell-style (quotes group words), then handed to clap,
// which checks arity and converts ids and status labels.

use clap::error::ErrorKind;
use clap::Parser;
use gt_goal::{normalize_status, GoalId, GoalStatus};

/// One command typed at the `$:` prompt.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "gt",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub enum ShellCommand {
    /// Add a goal for an employee on a team.
    Add {
        #[arg(allow_hyphen_values = true)]
        employee: String,
        #[arg(allow_hyphen_values = true)]
        description: String,
        #[arg(allow_hyphen_values = true)]
        team: String,
    },
    /// List an employee's goals by status.
    List {
        #[arg(allow_hyphen_values = true)]
        employee: String,
    },
    /// Set the status of a goal.
    Update {
        goal_id: GoalId,
        #[arg(value_parser = parse_status)]
        status: GoalStatus,
    },
    /// Delete a goal.
    Delete { goal_id: GoalId },
    /// Summarize a team's goals by status.
    Summary {
        #[arg(allow_hyphen_values = true)]
        team: String,
    },
    /// Show the command overview.
    Help,
}

fn parse_status(raw: &str) -> Result<GoalStatus, gt_goal::GoalError> {
    normalize_status(raw)
}

/// Why a line could not be turned into a command.
#[derive(Debug)]
pub enum LineError {
    /// Quoting was not closed.
    Tokenize(String),
    /// More tokens than the command takes (or an unknown flag).
    TooManyArguments,
    /// Anything else clap rejected: unknown command, missing arguments,
    /// a bad id or status.
    Invalid(String),
}

/// Parse a non-empty line into a command.
pub fn parse_line(line: &str) -> Result<ShellCommand, LineError> {
    let tokens = tokenize(line).map_err(|e| LineError::Tokenize(e.to_string()))?;
    ShellCommand::try_parse_from(tokens).map_err(|e| match e.kind() {
        ErrorKind::UnknownArgument => LineError::TooManyArguments,
        _ => LineError::Invalid(first_paragraph(&e.to_string())),
    })
}

/// clap errors end with usage and a `--help` hint that don't apply at the
/// prompt; keep only the message.
fn first_paragraph(rendered: &str) -> String {
    let message = rendered.split("\n\n").next().unwrap_or(rendered).trim();
    message.strip_prefix("error: ").unwrap_or(message).to_string()
}

/// Split a line into words the way a POSIX shell would: quotes group
/// words, `""` yields an empty word, and a backslash escapes the next
/// character outside quotes.
pub fn tokenize(line: &str) -> anyhow::Result<Vec<String>> {
    shlex::split(line).ok_or_else(|| anyhow::anyhow!("unbalanced quotes or trailing backslash"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_whitespace() {
        assert_eq!(tokenize("list  Alice\t").unwrap(), vec!["list", "Alice"]);
    }

    #[test]
    fn tokenize_groups_quoted_words() {
        assert_eq!(
            tokenize(r#"add "Employee Name" 'Goal Description' "Team Name""#).unwrap(),
            vec!["add", "Employee Name", "Goal Description", "Team Name"]
        );
    }

    #[test]
    fn tokenize_handles_escapes_and_adjacent_quotes() {
        assert_eq!(
            tokenize(r#"say "a \"quoted\" word" it\'s pre"fix"ed"#).unwrap(),
            vec!["say", r#"a "quoted" word"#, "it's", "prefixed"]
        );
    }

    #[test]
    fn tokenize_keeps_empty_quoted_words() {
        assert_eq!(tokenize(r#"add "" '' x"#).unwrap(), vec!["add", "", "", "x"]);
    }

    #[test]
    fn tokenize_rejects_unterminated_quotes() {
        assert!(tokenize(r#"add "Alice"#).is_err());
        assert!(tokenize("add 'Alice").is_err());
        assert!(tokenize("add Alice\\").is_err());
    }

    #[test]
    fn parse_all_commands() {
        assert_eq!(
            parse_line(r#"add "Alice Smith" "Write spec" Core"#).unwrap(),
            ShellCommand::Add {
                employee: "Alice Smith".into(),
                description: "Write spec".into(),
                team: "Core".into(),
            }
        );
        assert_eq!(
            parse_line("list Alice").unwrap(),
            ShellCommand::List { employee: "Alice".into() }
        );
        assert_eq!(
            parse_line(r#"update 12 "in progress""#).unwrap(),
            ShellCommand::Update { goal_id: 12, status: GoalStatus::InProgress }
        );
        assert_eq!(parse_line("delete 12").unwrap(), ShellCommand::Delete { goal_id: 12 });
        assert_eq!(
            parse_line("summary Core").unwrap(),
            ShellCommand::Summary { team: "Core".into() }
        );
        assert_eq!(parse_line("help").unwrap(), ShellCommand::Help);
    }

    #[test]
    fn status_is_normalized() {
        for raw in ["COMPLETED", "completed", "Completed"] {
            assert_eq!(
                parse_line(&format!("update 3 {}", raw)).unwrap(),
                ShellCommand::Update { goal_id: 3, status: GoalStatus::Completed }
            );
        }
        assert_eq!(
            parse_line("update 3 not_started").unwrap(),
            ShellCommand::Update { goal_id: 3, status: GoalStatus::NotStarted }
        );
    }

    #[test]
    fn extra_tokens_are_too_many_arguments() {
        assert!(matches!(parse_line("list Alice Bob"), Err(LineError::TooManyArguments)));
        assert!(matches!(parse_line("delete 1 2"), Err(LineError::TooManyArguments)));
        assert!(matches!(
            parse_line("add Alice Write spec Core"),
            Err(LineError::TooManyArguments)
        ));
    }

    #[test]
    fn leading_hyphen_is_plain_text() {
        assert_eq!(
            parse_line(r#"add Alice "-fix login bug" Core"#).unwrap(),
            ShellCommand::Add {
                employee: "Alice".into(),
                description: "-fix login bug".into(),
                team: "Core".into(),
            }
        );
        assert_eq!(
            parse_line("add -Ann -5 --core").unwrap(),
            ShellCommand::Add {
                employee: "-Ann".into(),
                description: "-5".into(),
                team: "--core".into(),
            }
        );
        assert_eq!(
            parse_line("list -Ann").unwrap(),
            ShellCommand::List { employee: "-Ann".into() }
        );
        assert_eq!(
            parse_line("summary --core").unwrap(),
            ShellCommand::Summary { team: "--core".into() }
        );
        assert!(matches!(parse_line("add Alice -5 Core -x"), Err(LineError::TooManyArguments)));
    }

    #[test]
    fn invalid_status_is_reported() {
        match parse_line("update 3 unknown") {
            Err(LineError::Invalid(message)) => {
                assert!(message.contains("`unknown` is not a valid status"), "{}", message)
            }
            other => panic!("expected invalid status, got {:?}", other),
        }
    }

    #[test]
    fn bad_input_is_invalid() {
        assert!(matches!(parse_line("update abc done"), Err(LineError::Invalid(_))));
        assert!(matches!(parse_line("list"), Err(LineError::Invalid(_))));
        assert!(matches!(parse_line("frobnicate x"), Err(LineError::Invalid(_))));
        assert!(matches!(parse_line("list \"Alice"), Err(LineError::Tokenize(_))));
    }
}
