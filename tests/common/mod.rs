#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use zombie_pursuit::layout::parse_layout;
use zombie_pursuit::{Cell, CellGrid, DistanceField, PursuitGrid};

/// Build a seeded simulation from a text layout
pub fn sim_from_layout(layout: &str, seed: u64) -> PursuitGrid<StdRng> {
    parse_layout(layout)
        .expect("layout should parse")
        .to_simulation(StdRng::seed_from_u64(seed))
        .expect("layout positions are on the grid")
}

/// All text layouts under test_data/layouts, sorted by name
pub fn layout_files() -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data/layouts");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .expect("test_data/layouts exists")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    files.sort();
    files
}

/// Every cell's distance, row by row
pub fn field_rows(field: &DistanceField) -> Vec<Vec<usize>> {
    (0..field.rows()).map(|row| field.row(row).to_vec()).collect()
}

pub fn assert_no_entity_on_obstacle(sim: &PursuitGrid<StdRng>, context: &str) {
    for cell in sim.zombies().chain(sim.humans()) {
        assert!(
            sim.grid().is_empty(cell),
            "{}: entity at ({}, {}) stands on an obstacle",
            context,
            cell.row,
            cell.col
        );
    }
}

/// True if the two cells touch along an axis or diagonal (or are equal)
pub fn within_one_step(a: Cell, b: Cell, diagonal: bool) -> bool {
    let dr = a.row.abs_diff(b.row);
    let dc = a.col.abs_diff(b.col);
    if diagonal {
        dr <= 1 && dc <= 1
    } else {
        dr + dc <= 1
    }
}
