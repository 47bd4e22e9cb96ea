use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// User edits and simulation steps taken in the viewer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    SetObstacle { row: usize, col: usize },
    RemoveObstacle { row: usize, col: usize },
    AddZombie { row: usize, col: usize },
    AddHuman { row: usize, col: usize },
    /// Remove every entity on a cell
    EraseEntities { row: usize, col: usize },
    /// One simulation tick with the entity counts after it
    Tick { zombies: usize, humans: usize },
    Clear,
    LoadScenario { rows: usize, cols: usize },
    PasteLayout { rows: usize, cols: usize },
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
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

    /// Log an action with current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction { timestamp_ms, action });
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), events = self.actions.len(), "saved action log");
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut obstacles_set = 0;
        let mut obstacles_removed = 0;
        let mut zombies_added = 0;
        let mut humans_added = 0;
        let mut erased = 0;
        let mut ticks = 0;
        let mut clears = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::SetObstacle { .. } => obstacles_set += 1,
                Action::RemoveObstacle { .. } => obstacles_removed += 1,
                Action::AddZombie { .. } => zombies_added += 1,
                Action::AddHuman { .. } => humans_added += 1,
                Action::EraseEntities { .. } => erased += 1,
                Action::Tick { .. } => ticks += 1,
                Action::Clear => clears += 1,
                Action::LoadScenario { .. } | Action::PasteLayout { .. } => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Obstacles: {} set, {} removed\n\
             Entities: {} zombies added, {} humans added, {} cells erased\n\
             Simulation: {} ticks, {} clears",
            duration,
            self.actions.len(),
            obstacles_set,
            obstacles_removed,
            zombies_added,
            humans_added,
            erased,
            ticks,
            clears
        )
    }
}
