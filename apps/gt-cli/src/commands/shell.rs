// shell.rs — The interactive `$:` prompt.
//
// Reads lines with rustyline and feeds them to the session until an empty
// line, Ctrl-C, or Ctrl-D. Whitespace-only lines are skipped. The dataset is saved on the way out, including
// when reading input fails.

use std::io::{self, Write};

use anyhow::Context;
use gt_goal::GoalStore;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::session::{LineOutcome, Session};

const PROMPT: &str = "$: ";

/// Run the prompt loop until the user exits, then save.
pub fn run<S: GoalStore>(mut session: Session<S>, show_banner: bool) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new().context("failed to start line editor")?;
    tracing::debug!(goals = session.dataset().len(), "shell started");

    if show_banner {
        let mut stdout = io::stdout().lock();
        stdout.write_all(session.renderer().banner().as_bytes())?;
        stdout.flush()?;
    }

    let mut read_error = None;
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = editor.add_history_entry(line.as_str()) {
                        tracing::debug!(error = %e, "history entry not recorded");
                    }
                }
                let mut stdout = io::stdout().lock();
                match session.handle_line(&line, &mut stdout) {
                    Ok(LineOutcome::Continue) => {}
                    Ok(LineOutcome::Exit) => break,
                    // The dataset is still intact in memory; keep going and
                    // let the exit save try again.
                    Err(e) => eprintln!("error: {:#}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                read_error = Some(e);
                break;
            }
        }
    }

    let store = session.finish()?;
    tracing::debug!(store = %store.describe(), "shell exited");

    match read_error {
        Some(e) => Err(e).context("failed to read input"),
        None => Ok(()),
    }
}
