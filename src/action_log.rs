use std::collections::HashMap;
use std::time::Instant;
use serde::{Serialize, Deserialize};

use crate::grid::{Position, Tag};
use crate::pursuit::Metric;

/// Action phase - whether the action is starting or finishing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionPhase {
    Start,
    Finish,
}

/// Boundary operations worth recording
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Generate an empty maze (rows, cols)
    GenerateMaze { rows: i32, cols: i32 },
    /// Generate an open walled rectangle with players (rows, cols)
    GenerateArena { rows: i32, cols: i32 },
    /// Place both players on a grid
    PlaceAgents { pursuer: Option<Position>, target: Option<Position> },
    /// One move of `mover` toward `target`
    Step { mover: Tag, target: Tag, metric: Metric, from: Option<Position>, to: Option<Position> },
    /// Distance query between the two agents
    Distance { manhattan: u32, path: Option<u32> },
    /// An operation failed with the given message
    Failed { message: String },
}

impl Action {
    /// Short name used to pair Start and Finish entries
    fn kind(&self) -> &'static str {
        match self {
            Action::GenerateMaze { .. } => "GenerateMaze",
            Action::GenerateArena { .. } => "GenerateArena",
            Action::PlaceAgents { .. } => "PlaceAgents",
            Action::Step { .. } => "Step",
            Action::Distance { .. } => "Distance",
            Action::Failed { .. } => "Failed",
        }
    }
}

/// Logged action with timestamp and phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    /// The action
    pub action: Action,
    /// Whether this is the start or finish of the action
    pub phase: ActionPhase,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp and phase
    pub fn log(&mut self, action: Action, phase: ActionPhase) {
        let elapsed = self.start_time.elapsed();
        let timestamp_ms = elapsed.as_millis() as u64;

        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            phase,
        });
    }

    /// Log the start of an action
    pub fn log_start(&mut self, action: Action) {
        self.log(action, ActionPhase::Start);
    }

    /// Log the finish of an action
    pub fn log_finish(&mut self, action: Action) {
        self.log(action, ActionPhase::Finish);
    }

    /// Get all logged actions
    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.actions)
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Print log with duration analysis
    pub fn print_with_durations(&self) {
        eprintln!("\n=== Action Log with Durations ===");

        let mut start_times: HashMap<&'static str, u64> = HashMap::new();

        for (i, logged) in self.actions.iter().enumerate() {
            let kind = logged.action.kind();

            match logged.phase {
                ActionPhase::Start => {
                    start_times.insert(kind, logged.timestamp_ms);
                    eprintln!("[{:6}ms] #{:3} START  {:?}", logged.timestamp_ms, i + 1, logged.action);
                }
                ActionPhase::Finish => {
                    if let Some(start_ms) = start_times.remove(kind) {
                        let duration = logged.timestamp_ms - start_ms;
                        eprintln!("[{:6}ms] #{:3} FINISH {:?} [duration: {}ms]",
                                logged.timestamp_ms, i + 1, logged.action, duration);
                    } else {
                        eprintln!("[{:6}ms] #{:3} FINISH {:?} [no matching start]",
                                logged.timestamp_ms, i + 1, logged.action);
                    }
                }
            }
        }
        eprintln!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut mazes = 0;
        let mut arenas = 0;
        let mut placements = 0;
        let mut steps = 0;
        let mut failures = 0;

        // Only count finish events to get actual completed action counts
        for logged in &self.actions {
            if matches!(logged.phase, ActionPhase::Finish) {
                match &logged.action {
                    Action::GenerateMaze { .. } => mazes += 1,
                    Action::GenerateArena { .. } => arenas += 1,
                    Action::PlaceAgents { .. } => placements += 1,
                    Action::Step { .. } => steps += 1,
                    Action::Failed { .. } => failures += 1,
                    Action::Distance { .. } => {}
                }
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Grids: {} mazes, {} arenas, {} placements\n\
             Moves: {} steps, {} failures",
            duration,
            self.actions.len(),
            mazes,
            arenas,
            placements,
            steps,
            failures
        )
    }
}
