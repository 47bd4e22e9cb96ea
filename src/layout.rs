use crate::error::{Result, SimError};
use crate::grid::{Cell, CellGrid};
use crate::save_state::Scenario;
use crate::simulation::PursuitGrid;
use rand::Rng;
use std::collections::HashSet;

/// Parse a text layout, one line per grid row.
///
/// - `.` empty
/// - `#` obstacle
/// - `Z` zombie
/// - `H` human
/// - `*` zombie and human on the same cell
///
/// Blank lines are skipped and every row must have the same width.
pub fn parse_layout(text: &str) -> Result<Scenario> {
    let mut scenario = Scenario::default();

    let rows = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty());

    for (row, (line_no, line)) in rows.enumerate() {
        let width = line.chars().count();
        if row == 0 {
            scenario.cols = width;
        } else if width != scenario.cols {
            return Err(SimError::Layout {
                line: line_no,
                message: format!("expected {} columns, found {}", scenario.cols, width),
            });
        }

        for (col, ch) in line.chars().enumerate() {
            let cell = Cell::new(row, col);
            match ch {
                '.' => {}
                '#' => scenario.obstacles.push(cell),
                'Z' | 'z' => scenario.zombies.push(cell),
                'H' | 'h' => scenario.humans.push(cell),
                '*' => {
                    scenario.zombies.push(cell);
                    scenario.humans.push(cell);
                }
                other => {
                    return Err(SimError::Layout {
                        line: line_no,
                        message: format!("unexpected character '{}'", other),
                    })
                }
            }
        }
        scenario.rows = row + 1;
    }

    Ok(scenario)
}

/// Render the current state in the format [`parse_layout`] reads.
///
/// Repeated entities on one cell collapse to a single symbol.
pub fn render_layout<R: Rng>(sim: &PursuitGrid<R>) -> String {
    let zombies: HashSet<Cell> = sim.zombies().collect();
    let humans: HashSet<Cell> = sim.humans().collect();
    let grid = sim.grid();

    let mut result = String::with_capacity((sim.cols() + 1) * sim.rows());
    for row in 0..sim.rows() {
        for col in 0..sim.cols() {
            let cell = Cell::new(row, col);
            let symbol = match (zombies.contains(&cell), humans.contains(&cell)) {
                (true, true) => '*',
                (true, false) => 'Z',
                (false, true) => 'H',
                (false, false) if grid.is_full(cell) => '#',
                (false, false) => '.',
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let scenario = parse_layout("\nZ.#\n..*\n\nH..\n").unwrap();
        assert_eq!(scenario.rows, 3);
        assert_eq!(scenario.cols, 3);
        assert_eq!(scenario.obstacles, vec![Cell::new(0, 2)]);
        assert_eq!(scenario.zombies, vec![Cell::new(0, 0), Cell::new(1, 2)]);
        assert_eq!(scenario.humans, vec![Cell::new(1, 2), Cell::new(2, 0)]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = parse_layout("...\n..\n").unwrap_err();
        assert!(matches!(err, SimError::Layout { line: 2, .. }));
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        assert!(matches!(parse_layout(".x.\n"), Err(SimError::Layout { line: 1, .. })));
    }

    #[test]
    fn test_render_matches_parsed_layout() {
        let text = "Z..#\n.##.\n...*\n";
        let sim = parse_layout(text).unwrap().to_simulation(rand::thread_rng()).unwrap();
        assert_eq!(render_layout(&sim), text);
    }

    #[test]
    fn test_render_collapses_stacked_entities() {
        let mut sim = parse_layout("Z..\n").unwrap().to_simulation(rand::thread_rng()).unwrap();
        sim.add_zombie(0, 0).unwrap();
        let reparsed = parse_layout(&render_layout(&sim)).unwrap();
        assert_eq!(sim.num_zombies(), 2);
        assert_eq!(reparsed.zombies, vec![Cell::new(0, 0)]);
    }
}
