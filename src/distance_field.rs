use crate::grid::{Cell, CellGrid, Grid};
use std::collections::VecDeque;

/// Shortest obstacle-avoiding step counts from the nearest source cell.
///
/// Cells no source can reach hold [`DistanceField::sentinel`], which is
/// `rows * cols` and therefore larger than any real path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    rows: usize,
    cols: usize,
    values: Vec<usize>,
}

impl DistanceField {
    /// A field where every cell is unreached
    pub fn unreached(rows: usize, cols: usize) -> Self {
        DistanceField {
            rows,
            cols,
            values: vec![rows * cols; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The "infinity" value held by unreached cells
    pub fn sentinel(&self) -> usize {
        self.rows * self.cols
    }

    /// Distance at a cell. Panics if the cell is off the field.
    pub fn get(&self, cell: Cell) -> usize {
        self.values[self.index(cell)]
    }

    pub fn is_reachable(&self, cell: Cell) -> bool {
        self.get(cell) < self.sentinel()
    }

    /// One row of distances. Panics if the row is off the field.
    pub fn row(&self, row: usize) -> &[usize] {
        let start = row * self.cols;
        &self.values[start..start + self.cols]
    }

    /// Largest finite distance, if any cell was reached
    pub fn max_reached(&self) -> Option<usize> {
        let sentinel = self.sentinel();
        self.values.iter().copied().filter(|&d| d < sentinel).max()
    }

    fn index(&self, cell: Cell) -> usize {
        assert!(
            cell.row < self.rows && cell.col < self.cols,
            "cell ({}, {}) outside {}x{} distance field",
            cell.row,
            cell.col,
            self.rows,
            self.cols
        );
        cell.col + cell.row * self.cols
    }

    fn set(&mut self, cell: Cell, value: usize) {
        let idx = self.index(cell);
        self.values[idx] = value;
    }
}

/// Multi-source breadth-first search over 4-neighbors.
///
/// Every source starts at distance 0. Full cells are never entered. Sources
/// must lie on the grid.
pub fn compute<G: CellGrid + ?Sized>(grid: &G, sources: &[Cell]) -> DistanceField {
    let mut field = DistanceField::unreached(grid.rows(), grid.cols());
    let mut visited = Grid::new(grid.rows(), grid.cols());
    let mut boundary: VecDeque<Cell> = sources.iter().copied().collect();

    for &cell in &boundary {
        visited.set_full(cell);
        field.set(cell, 0);
    }

    while let Some(cell) = boundary.pop_front() {
        let next_distance = field.get(cell) + 1;
        for neighbor in grid.four_neighbors(cell) {
            if grid.is_empty(neighbor) && visited.is_empty(neighbor) {
                visited.set_full(neighbor);
                field.set(neighbor, next_distance);
                boundary.push_back(neighbor);
            }
        }
    }

    field
}
