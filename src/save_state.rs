use crate::error::Result;
use crate::grid::Cell;
use crate::layout;
use crate::simulation::PursuitGrid;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Snapshot of grid dimensions, obstacles and entity positions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub obstacles: Vec<Cell>,
    #[serde(default)]
    pub zombies: Vec<Cell>,
    #[serde(default)]
    pub humans: Vec<Cell>,
}

impl Scenario {
    /// Capture the current state of a simulation
    pub fn from_simulation<R: Rng>(sim: &PursuitGrid<R>) -> Self {
        Scenario {
            rows: sim.rows(),
            cols: sim.cols(),
            obstacles: sim.grid().obstacles(),
            zombies: sim.zombies().collect(),
            humans: sim.humans().collect(),
        }
    }

    /// Build a simulation from this snapshot; positions are validated
    pub fn to_simulation<R: Rng>(&self, rng: R) -> Result<PursuitGrid<R>> {
        PursuitGrid::new(self.rows, self.cols, &self.obstacles, &self.zombies, &self.humans, rng)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save as JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), "saved scenario");
        Ok(())
    }

    /// Load a `.json` scenario, or a text layout for any other extension
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let scenario = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            Self::from_json(&contents)?
        } else {
            layout::parse_layout(&contents)?
        };
        info!(
            path = %path.display(),
            rows = scenario.rows,
            cols = scenario.cols,
            zombies = scenario.zombies.len(),
            humans = scenario.humans.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }
}
