mod common;

use common::{field_rows, sim_from_layout};
use zombie_pursuit::{Cell, EntityKind, PursuitGrid};

#[test]
fn test_empty_grid_is_manhattan_from_corner() {
    let mut sim = PursuitGrid::with_seed(6, 7, 0);
    sim.add_human(0, 0).unwrap();

    let field = sim.compute_distance_field(EntityKind::Human);
    for row in 0..6 {
        for col in 0..7 {
            assert_eq!(field.get(Cell::new(row, col)), row + col, "cell ({}, {})", row, col);
        }
    }
}

#[test]
fn test_every_source_is_zero() {
    let sim = sim_from_layout(
        "Z..#H\n\
         .#..Z\n\
         H...*\n",
        0,
    );

    let zombie_field = sim.compute_distance_field(EntityKind::Zombie);
    for zombie in sim.zombies() {
        assert_eq!(zombie_field.get(zombie), 0);
    }

    let human_field = sim.compute_distance_field(EntityKind::Human);
    for human in sim.humans() {
        assert_eq!(human_field.get(human), 0);
    }
}

#[test]
fn test_nearest_source_wins() {
    let sim = sim_from_layout(
        "Z.......Z\n",
        0,
    );
    let field = sim.compute_distance_field(EntityKind::Zombie);
    assert_eq!(field.row(0), &[0, 1, 2, 3, 4, 3, 2, 1, 0]);
}

#[test]
fn test_obstacles_keep_sentinel_and_block_paths() {
    let sim = sim_from_layout(
        "H#...\n\
         .#.#.\n\
         ...#.\n",
        0,
    );
    let field = sim.compute_distance_field(EntityKind::Human);
    let sentinel = 15;
    assert_eq!(field.sentinel(), sentinel);

    assert_eq!(
        field_rows(&field),
        vec![
            vec![0, sentinel, 6, 7, 8],
            vec![1, sentinel, 5, sentinel, 9],
            vec![2, 3, 4, sentinel, 10],
        ]
    );
}

#[test]
fn test_wall_leaves_far_side_unreached() {
    let sim = sim_from_layout(
        "Z.#...\n\
         ..#...\n\
         ..#...\n\
         ..#...\n",
        0,
    );
    let field = sim.compute_distance_field(EntityKind::Zombie);
    let sentinel = 4 * 6;

    for row in 0..4 {
        for col in 2..6 {
            assert_eq!(field.get(Cell::new(row, col)), sentinel, "cell ({}, {})", row, col);
            assert!(!field.is_reachable(Cell::new(row, col)));
        }
        assert!(field.is_reachable(Cell::new(row, 0)));
    }
}

#[test]
fn test_empty_source_list_is_all_sentinel() {
    let sim = sim_from_layout(
        "H..\n\
         .#.\n\
         ...\n",
        0,
    );
    let field = sim.compute_distance_field(EntityKind::Zombie);
    assert!(field_rows(&field).iter().flatten().all(|&d| d == 9));
    assert_eq!(field.max_reached(), None);
}

#[test]
fn test_diagonal_gap_is_not_a_path() {
    // The only way from Z to the right half would be a diagonal squeeze
    let sim = sim_from_layout(
        "Z#.\n\
         #..\n",
        0,
    );
    let field = sim.compute_distance_field(EntityKind::Zombie);
    assert!(!field.is_reachable(Cell::new(1, 1)));
    assert!(!field.is_reachable(Cell::new(0, 2)));
}
