pub mod action_log;
pub mod config;
pub mod distance_field;
pub mod error;
pub mod grid;
pub mod layout;
pub mod logging;
pub mod save_state;
pub mod simulation;

pub use distance_field::DistanceField;
pub use error::{Result, SimError};
pub use grid::{Cell, CellGrid, Grid};
pub use save_state::Scenario;
pub use simulation::{EntityKind, MoveOrder, PursuitGrid};
