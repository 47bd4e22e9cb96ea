use std::env;
use std::process;
use tracing::{error, info};
use zombie_pursuit::layout::render_layout;
use zombie_pursuit::simulation::seeded_rng;
use zombie_pursuit::{EntityKind, MoveOrder, Scenario};

const DEFAULT_TICKS: usize = 10;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <scenario> [ticks] [seed] [zombies_first|humans_first]", program);
    eprintln!("Plays a scenario headless and prints each frame");
    process::exit(1);
}

/// Loads a scenario (`.json` or text layout), plays it for a number of ticks
/// and prints every frame as a text layout.
fn main() {
    zombie_pursuit::logging::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }

    let ticks = match args.get(2).map(|s| s.parse::<usize>()) {
        None => DEFAULT_TICKS,
        Some(Ok(ticks)) => ticks,
        Some(Err(_)) => usage(&args[0]),
    };
    let seed = match args.get(3).map(|s| s.parse::<u64>()) {
        None => None,
        Some(Ok(seed)) => Some(seed),
        Some(Err(_)) => usage(&args[0]),
    };
    let order = match args.get(4).map(|s| s.parse::<MoveOrder>()) {
        None => MoveOrder::default(),
        Some(Ok(order)) => order,
        Some(Err(e)) => {
            error!(error = %e, "bad move order");
            usage(&args[0]);
        }
    };

    if let Err(e) = run(&args[1], ticks, seed, order) {
        error!(error = %e, "scenario run failed");
        process::exit(1);
    }
}

fn run(path: &str, ticks: usize, seed: Option<u64>, order: MoveOrder) -> zombie_pursuit::Result<()> {
    let scenario = Scenario::load_from_file(path)?;
    let mut sim = scenario.to_simulation(seeded_rng(seed))?;

    println!("=== Tick 0 ===");
    print!("{}", render_layout(&sim));

    for tick in 1..=ticks {
        sim.tick(order)?;
        println!("=== Tick {} ===", tick);
        print!("{}", render_layout(&sim));
    }

    let zombie_distance = sim.compute_distance_field(EntityKind::Zombie);
    let closest = sim.humans().map(|h| zombie_distance.get(h)).min();
    info!(
        ticks,
        zombies = sim.num_zombies(),
        humans = sim.num_humans(),
        closest_human = ?closest,
        "run complete"
    );
    Ok(())
}
