// session.rs — One interactive session over a loaded dataset.
//
// The session owns the Dataset for its whole lifetime and writes it back
// through its GoalStore: at exit, and also after every change when the
// after_each_change policy is configured. Each input line is one command
// against the in-memory dataset.

use std::io::Write;

use anyhow::Context;
use gt_goal::{list_by_owner, Dataset, GoalStore, OwnerKind};

use crate::commands::line::{parse_line, LineError, ShellCommand};
use crate::commands::render::Renderer;
use crate::config::PersistPolicy;

/// What the shell loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
}

/// An open session: the dataset, where it came from, and how to show it.
pub struct Session<S: GoalStore> {
    dataset: Dataset,
    store: S,
    persist: PersistPolicy,
    renderer: Renderer,
}

impl<S: GoalStore> Session<S> {
    /// Load the dataset from `store` and start a session over it.
    pub fn open(store: S, persist: PersistPolicy, renderer: Renderer) -> anyhow::Result<Self> {
        let dataset = store
            .load()
            .with_context(|| format!("failed to load goals from {}", store.describe()))?;
        tracing::info!(goals = dataset.len(), store = %store.describe(), ?persist, "session opened");
        Ok(Self {
            dataset,
            store,
            persist,
            renderer,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn renderer(&self) -> Renderer {
        self.renderer
    }

    /// Handle one line of input, writing any response to `out`.
    ///
    /// Input mistakes are reported to `out` and are not errors; an `Err`
    /// means output or persistence failed.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> anyhow::Result<LineOutcome> {
        if line.is_empty() {
            return Ok(LineOutcome::Exit);
        }
        if line.trim().is_empty() {
            return Ok(LineOutcome::Continue);
        }

        let response = match parse_line(line) {
            Ok(command) => self.execute(command)?,
            Err(LineError::TooManyArguments) => self.renderer.too_many_arguments(line),
            Err(LineError::Tokenize(message)) => self
                .renderer
                .invalid(&format!("Could not parse input: {}", message)),
            Err(LineError::Invalid(message)) => self.renderer.invalid(&message),
        };

        out.write_all(response.as_bytes())?;
        out.flush()?;
        Ok(LineOutcome::Continue)
    }

    /// Run a parsed command and return the text to show.
    fn execute(&mut self, command: ShellCommand) -> anyhow::Result<String> {
        let response = match command {
            ShellCommand::Add {
                employee,
                description,
                team,
            } => {
                let goal = self.dataset.create(&employee, &description, &team);
                let response = self.renderer.added(goal);
                self.after_change()?;
                response
            }
            ShellCommand::List { employee } => {
                let groups = list_by_owner(&self.dataset, OwnerKind::Employee, &employee);
                self.renderer.employee_goals(&employee, groups.as_ref())
            }
            ShellCommand::Update { goal_id, status } => {
                if self.dataset.update_status(goal_id, status) {
                    self.after_change()?;
                }
                match self.dataset.get(goal_id) {
                    Some(goal) => self.renderer.updated(goal),
                    None => self.renderer.not_found(goal_id),
                }
            }
            ShellCommand::Delete { goal_id } => match self.dataset.delete(goal_id) {
                Some(goal) => {
                    self.after_change()?;
                    self.renderer.deleted(&goal)
                }
                None => self.renderer.not_found(goal_id),
            },
            ShellCommand::Summary { team } => {
                let groups = list_by_owner(&self.dataset, OwnerKind::Team, &team);
                self.renderer.team_summary(&team, groups.as_ref())
            }
            ShellCommand::Help => self.renderer.banner(),
        };
        Ok(response)
    }

    fn after_change(&mut self) -> anyhow::Result<()> {
        if self.persist == PersistPolicy::AfterEachChange {
            self.save()?;
        }
        Ok(())
    }

    fn save(&mut self) -> anyhow::Result<()> {
        self.store
            .persist(&self.dataset)
            .with_context(|| format!("failed to save goals to {}", self.store.describe()))
    }

    /// End the session: write the dataset back and hand the store back.
    pub fn finish(mut self) -> anyhow::Result<S> {
        self.save()?;
        tracing::info!(goals = self.dataset.len(), "session closed");
        Ok(self.store)
    }
}
