use crate::distance_field::{self, DistanceField};
use crate::error::{Result, SimError};
use crate::grid::{Cell, CellGrid, Grid};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which entity list seeds a distance field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Human,
    Zombie,
}

impl FromStr for EntityKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(EntityKind::Human),
            "zombie" => Ok(EntityKind::Zombie),
            other => Err(SimError::InvalidArgument(format!("unknown entity kind '{}'", other))),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Human => write!(f, "human"),
            EntityKind::Zombie => write!(f, "zombie"),
        }
    }
}

/// Which side moves first within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOrder {
    #[default]
    ZombiesFirst,
    HumansFirst,
}

impl FromStr for MoveOrder {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zombies_first" => Ok(MoveOrder::ZombiesFirst),
            "humans_first" => Ok(MoveOrder::HumansFirst),
            other => Err(SimError::InvalidArgument(format!("unknown move order '{}'", other))),
        }
    }
}

/// Deterministic RNG when a seed is given, entropy-seeded otherwise
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Obstacle grid plus zombie and human positions.
///
/// Zombies step along 4-neighbors toward the nearest human, humans step along
/// 8-neighbors away from the nearest zombie. Both read distance fields built
/// by multi-source BFS, and every entity of a kind moves simultaneously.
/// Entities never share a cell with an obstacle.
#[derive(Debug, Clone)]
pub struct PursuitGrid<R: Rng = StdRng> {
    grid: Grid,
    zombies: Vec<Cell>,
    humans: Vec<Cell>,
    rng: R,
}

impl PursuitGrid<StdRng> {
    /// Empty simulation with a deterministic RNG
    pub fn with_seed(rows: usize, cols: usize, seed: u64) -> Self {
        Self::with_rng(rows, cols, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PursuitGrid<R> {
    pub fn with_rng(rows: usize, cols: usize, rng: R) -> Self {
        PursuitGrid {
            grid: Grid::new(rows, cols),
            zombies: Vec::new(),
            humans: Vec::new(),
            rng,
        }
    }

    /// Build a simulation with the given obstacles and entities.
    ///
    /// Fails on the first position outside the grid or on an entity placed
    /// on an obstacle.
    pub fn new(
        rows: usize,
        cols: usize,
        obstacles: &[Cell],
        zombies: &[Cell],
        humans: &[Cell],
        rng: R,
    ) -> Result<Self> {
        let mut sim = Self::with_rng(rows, cols, rng);
        for cell in obstacles {
            sim.set_obstacle(cell.row, cell.col)?;
        }
        for cell in zombies {
            sim.add_zombie(cell.row, cell.col)?;
        }
        for cell in humans {
            sim.add_human(cell.row, cell.col)?;
        }
        Ok(sim)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows
    }

    pub fn cols(&self) -> usize {
        self.grid.cols
    }

    /// Empty every cell and drop all entities
    pub fn clear(&mut self) {
        self.grid.clear();
        self.zombies.clear();
        self.humans.clear();
    }

    fn checked_cell(&self, row: usize, col: usize) -> Result<Cell> {
        let cell = Cell::new(row, col);
        if self.grid.contains(cell) {
            Ok(cell)
        } else {
            Err(SimError::InvalidPosition {
                row,
                col,
                rows: self.grid.rows,
                cols: self.grid.cols,
            })
        }
    }

    fn open_cell(&self, row: usize, col: usize) -> Result<Cell> {
        let cell = self.checked_cell(row, col)?;
        if self.grid.is_full(cell) {
            return Err(SimError::Blocked { row, col });
        }
        Ok(cell)
    }

    /// Mark a cell as an obstacle. Fails if a zombie or human stands on it.
    pub fn set_obstacle(&mut self, row: usize, col: usize) -> Result<()> {
        let cell = self.checked_cell(row, col)?;
        if self.zombies.contains(&cell) || self.humans.contains(&cell) {
            return Err(SimError::Occupied { row, col });
        }
        self.grid.set_full(cell);
        Ok(())
    }

    pub fn remove_obstacle(&mut self, row: usize, col: usize) -> Result<()> {
        let cell = self.checked_cell(row, col)?;
        self.grid.set_empty(cell);
        Ok(())
    }

    pub fn add_zombie(&mut self, row: usize, col: usize) -> Result<()> {
        let cell = self.open_cell(row, col)?;
        self.zombies.push(cell);
        Ok(())
    }

    pub fn add_human(&mut self, row: usize, col: usize) -> Result<()> {
        let cell = self.open_cell(row, col)?;
        self.humans.push(cell);
        Ok(())
    }

    /// Drop every zombie and human standing on the cell
    pub fn remove_entities_at(&mut self, cell: Cell) {
        self.zombies.retain(|&z| z != cell);
        self.humans.retain(|&h| h != cell);
    }

    pub fn num_zombies(&self) -> usize {
        self.zombies.len()
    }

    pub fn num_humans(&self) -> usize {
        self.humans.len()
    }

    /// Zombies in the order they were added
    pub fn zombies(&self) -> impl Iterator<Item = Cell> + '_ {
        self.zombies.iter().copied()
    }

    /// Humans in the order they were added
    pub fn humans(&self) -> impl Iterator<Item = Cell> + '_ {
        self.humans.iter().copied()
    }

    /// BFS distance from every cell to the nearest entity of `kind`
    pub fn compute_distance_field(&self, kind: EntityKind) -> DistanceField {
        let sources = match kind {
            EntityKind::Zombie => &self.zombies,
            EntityKind::Human => &self.humans,
        };
        distance_field::compute(&self.grid, sources)
    }

    fn check_field(&self, field: &DistanceField) -> Result<()> {
        if field.rows() != self.grid.rows || field.cols() != self.grid.cols {
            return Err(SimError::FieldMismatch {
                field_rows: field.rows(),
                field_cols: field.cols(),
                rows: self.grid.rows,
                cols: self.grid.cols,
            });
        }
        Ok(())
    }

    /// Move each human to a farther empty 8-neighbor, if one exists
    pub fn move_humans(&mut self, zombie_distance: &DistanceField) -> Result<()> {
        self.check_field(zombie_distance)?;
        let moved: Vec<Cell> = self
            .humans
            .iter()
            .map(|&human| {
                let neighbors = self.grid.eight_neighbors(human);
                pick_step(&self.grid, neighbors, human, zombie_distance, |a, b| a > b, &mut self.rng)
            })
            .collect();
        debug!(moved = count_moved(&self.humans, &moved), total = moved.len(), "humans moved");
        self.humans = moved;
        Ok(())
    }

    /// Move each zombie to a closer empty 4-neighbor, if one exists
    pub fn move_zombies(&mut self, human_distance: &DistanceField) -> Result<()> {
        self.check_field(human_distance)?;
        let moved: Vec<Cell> = self
            .zombies
            .iter()
            .map(|&zombie| {
                let neighbors = self.grid.four_neighbors(zombie);
                pick_step(&self.grid, neighbors, zombie, human_distance, |a, b| a < b, &mut self.rng)
            })
            .collect();
        debug!(moved = count_moved(&self.zombies, &moved), total = moved.len(), "zombies moved");
        self.zombies = moved;
        Ok(())
    }

    /// One simulation step. Both fields come from pre-tick positions.
    pub fn tick(&mut self, order: MoveOrder) -> Result<()> {
        let human_distance = self.compute_distance_field(EntityKind::Human);
        let zombie_distance = self.compute_distance_field(EntityKind::Zombie);
        match order {
            MoveOrder::ZombiesFirst => {
                self.move_zombies(&human_distance)?;
                self.move_humans(&zombie_distance)?;
            }
            MoveOrder::HumansFirst => {
                self.move_humans(&zombie_distance)?;
                self.move_zombies(&human_distance)?;
            }
        }
        Ok(())
    }
}

/// Choose where an entity at `current` steps next.
///
/// `better(a, b)` is true when distance `a` is strictly preferred over `b`.
/// The entity stays unless some empty neighbor is strictly better than its
/// own cell; ties among the best neighbors are broken uniformly at random.
fn pick_step<R: Rng>(
    grid: &Grid,
    neighbors: Vec<Cell>,
    current: Cell,
    field: &DistanceField,
    better: impl Fn(usize, usize) -> bool,
    rng: &mut R,
) -> Cell {
    let open: Vec<Cell> = neighbors.into_iter().filter(|&n| grid.is_empty(n)).collect();

    let mut best = field.get(current);
    for &cell in &open {
        let distance = field.get(cell);
        if better(distance, best) {
            best = distance;
        }
    }
    if best == field.get(current) {
        return current;
    }

    let candidates: Vec<Cell> = open.into_iter().filter(|&n| field.get(n) == best).collect();
    candidates.choose(rng).copied().unwrap_or(current)
}

fn count_moved(before: &[Cell], after: &[Cell]) -> usize {
    before.iter().zip(after).filter(|(a, b)| a != b).count()
}
