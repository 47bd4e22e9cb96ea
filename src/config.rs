use crate::error::Result;
use crate::simulation::{EntityKind, MoveOrder};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Fixed RNG seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: f32,
    #[serde(default)]
    pub move_order: MoveOrder,
}

/// Which distance field the viewer shades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    #[default]
    None,
    Zombie,
    Human,
}

impl Overlay {
    pub fn next(self) -> Self {
        match self {
            Overlay::None => Overlay::Zombie,
            Overlay::Zombie => Overlay::Human,
            Overlay::Human => Overlay::None,
        }
    }

    pub fn entity(self) -> Option<EntityKind> {
        match self {
            Overlay::None => None,
            Overlay::Zombie => Some(EntityKind::Zombie),
            Overlay::Human => Some(EntityKind::Human),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default)]
    pub overlay: Overlay,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario JSON or text layout loaded at startup
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_save_path")]
    pub save_path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_rows() -> usize { 30 }
fn default_cols() -> usize { 40 }
fn default_cell_size() -> f32 { 20.0 }
fn default_ticks_per_second() -> f32 { 4.0 }
fn default_window_title() -> String { "Zombie Pursuit".to_string() }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_save_path() -> String { "scenario.json".to_string() }
fn default_enable_action_log() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ticks_per_second: default_ticks_per_second(),
            move_order: MoveOrder::default(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            overlay: Overlay::default(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            path: None,
            save_path: default_save_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, or use defaults
    pub fn load() -> Self {
        Self::load_or_default("config.toml")
    }

    /// Load from a file, falling back to defaults if it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                    Config::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Config::default()
            }
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.grid.rows, 30);
        assert_eq!(config.grid.cols, 40);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.simulation.move_order, MoveOrder::ZombiesFirst);
        assert_eq!(config.visual.overlay, Overlay::None);
        assert!(config.logging.enable_action_log);
        assert!(config.scenario.path.is_none());
        assert_eq!(config.scenario.save_path, "scenario.json");
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [grid]
            rows = 10

            [simulation]
            seed = 42
            move_order = "humans_first"

            [visual]
            overlay = "human"
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.rows, 10);
        assert_eq!(config.grid.cols, 40);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.ticks_per_second, 4.0);
        assert_eq!(config.simulation.move_order, MoveOrder::HumansFirst);
        assert_eq!(config.visual.overlay.entity(), Some(EntityKind::Human));
    }

    #[test]
    fn test_bad_value_is_an_error() {
        assert!(Config::from_toml_str("[simulation]\nmove_order = \"sideways\"").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert_eq!(config.grid.cell_size, 20.0);
    }

    #[test]
    fn test_overlay_cycles() {
        assert_eq!(Overlay::None.next().next().next(), Overlay::None);
    }
}
