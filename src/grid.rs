use serde::{Deserialize, Serialize};

/// Cell value for a walkable cell
pub const EMPTY: u8 = 0;
/// Cell value for an obstacle (or a visited marker during search)
pub const FULL: u8 = 1;

/// A (row, col) position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Grid-step distance ignoring obstacles
    pub fn manhattan(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// What the simulation needs from an obstacle grid.
///
/// Neighbor enumeration never yields cells outside the grid. Out-of-bounds
/// queries report the cell as full.
pub trait CellGrid {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn is_full(&self, cell: Cell) -> bool;
    fn set_full(&mut self, cell: Cell);
    fn set_empty(&mut self, cell: Cell);
    fn clear(&mut self);

    fn is_empty(&self, cell: Cell) -> bool {
        !self.is_full(cell)
    }

    fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.col < self.cols()
    }

    /// Up, down, left, right
    fn four_neighbors(&self, cell: Cell) -> Vec<Cell> {
        const OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        offset_cells(self, cell, &OFFSETS)
    }

    /// The four axis neighbors followed by the four diagonals
    fn eight_neighbors(&self, cell: Cell) -> Vec<Cell> {
        const OFFSETS: [(isize, isize); 8] = [
            (-1, 0), (1, 0), (0, -1), (0, 1),
            (-1, -1), (-1, 1), (1, -1), (1, 1),
        ];
        offset_cells(self, cell, &OFFSETS)
    }
}

fn offset_cells<G: CellGrid + ?Sized>(grid: &G, cell: Cell, offsets: &[(isize, isize)]) -> Vec<Cell> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            let neighbor = Cell::new(row, col);
            grid.contains(neighbor).then_some(neighbor)
        })
        .collect()
}

/// Rectangular obstacle grid stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<u8>,
}

impl Grid {
    /// Create a new grid with all cells empty
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    /// Create a grid with specific obstacle cells; off-grid cells are skipped
    pub fn with_obstacles(rows: usize, cols: usize, obstacles: &[Cell]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &cell in obstacles {
            grid.set_full(cell);
        }
        grid
    }

    /// Convert a cell to its row-major index
    pub fn get_id(&self, cell: Cell) -> usize {
        cell.col + cell.row * self.cols
    }

    /// Convert a row-major index back to a cell
    pub fn get_cell(&self, id: usize) -> Cell {
        Cell::new(id / self.cols, id % self.cols)
    }

    /// All full cells in row-major order
    pub fn obstacles(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value == FULL)
            .map(|(id, _)| self.get_cell(id))
            .collect()
    }

    fn set_value(&mut self, cell: Cell, value: u8) {
        if self.contains(cell) {
            let id = self.get_id(cell);
            self.cells[id] = value;
        }
    }
}

impl CellGrid for Grid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn is_full(&self, cell: Cell) -> bool {
        if !self.contains(cell) {
            return true; // Out of bounds is considered full
        }
        self.cells[self.get_id(cell)] == FULL
    }

    fn set_full(&mut self, cell: Cell) {
        self.set_value(cell, FULL);
    }

    fn set_empty(&mut self, cell: Cell) {
        self.set_value(cell, EMPTY);
    }

    fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}
