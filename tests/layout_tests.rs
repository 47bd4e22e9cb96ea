mod common;

use common::{assert_no_entity_on_obstacle, layout_files, sim_from_layout, within_one_step};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use zombie_pursuit::layout::render_layout;
use zombie_pursuit::{Cell, MoveOrder, Scenario};

const TICKS: usize = 25;

#[test]
fn layout_file_runs_keep_invariants() {
    let files = layout_files();
    assert!(!files.is_empty(), "no layouts found");

    for path in files {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown").to_string();
        let text = fs::read_to_string(&path).unwrap();

        for order in [MoveOrder::ZombiesFirst, MoveOrder::HumansFirst] {
            let mut sim = sim_from_layout(&text, 17);
            let obstacles = sim.grid().obstacles();
            let (zombie_count, human_count) = (sim.num_zombies(), sim.num_humans());

            for tick in 0..TICKS {
                let zombies_before: Vec<Cell> = sim.zombies().collect();
                let humans_before: Vec<Cell> = sim.humans().collect();
                sim.tick(order).unwrap();

                let context = format!("{} [{:?}] tick {}", name, order, tick);
                assert_no_entity_on_obstacle(&sim, &context);
                assert_eq!(sim.num_zombies(), zombie_count, "{}", context);
                assert_eq!(sim.num_humans(), human_count, "{}", context);
                assert_eq!(sim.grid().obstacles(), obstacles, "{}", context);

                for (old, new) in zombies_before.iter().zip(sim.zombies()) {
                    assert!(within_one_step(*old, new, false), "{}: zombie jumped", context);
                }
                for (old, new) in humans_before.iter().zip(sim.humans()) {
                    assert!(within_one_step(*old, new, true), "{}: human jumped", context);
                }
            }
        }
    }
}

#[test]
fn layout_files_survive_render_and_json() {
    for path in layout_files() {
        let text = fs::read_to_string(&path).unwrap();
        let sim = sim_from_layout(&text, 0);

        // Layout files have no duplicated entities, so rendering is lossless
        assert_eq!(render_layout(&sim), text, "{}", path.display());

        let scenario = Scenario::load_from_file(&path).unwrap();
        let json = scenario.to_json().unwrap();
        let restored = Scenario::from_json(&json).unwrap();
        assert_eq!(restored, scenario);

        let rebuilt = restored.to_simulation(StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(render_layout(&rebuilt), text, "{}", path.display());
    }
}

#[test]
fn scenario_file_roundtrip_on_disk() {
    let sim = sim_from_layout("Z.#\n.#H\n...\n", 4);
    let path = std::env::temp_dir().join(format!("zombie_pursuit_{}.json", std::process::id()));

    Scenario::from_simulation(&sim).save_to_file(&path).unwrap();
    let loaded = Scenario::load_from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(loaded.rows, 3);
    assert_eq!(loaded.cols, 3);
    assert_eq!(loaded.obstacles, vec![Cell::new(0, 2), Cell::new(1, 1)]);
    assert_eq!(loaded.zombies, vec![Cell::new(0, 0)]);
    assert_eq!(loaded.humans, vec![Cell::new(1, 2)]);
}
