use clap::Parser;

use elevator_sim::simulation::SimWorld;

#[derive(Parser)]
#[command(name = "elevator_sim")]
#[command(about = "Elevator dispatch simulation")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "3000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f64,

    /// Number of floors in the building
    #[arg(long, default_value = "8")]
    floors: usize,

    /// Number of elevators in the bank
    #[arg(long, default_value = "2")]
    elevators: usize,

    /// Expected passenger arrivals per second
    #[arg(long, default_value = "0.4")]
    spawn_rate: f64,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    run_headless(&cli);
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) {
    println!("Running elevator simulation in headless mode...");
    println!(
        "Ticks: {}, Delta: {}s, Floors: {}, Elevators: {}",
        cli.ticks, cli.delta, cli.floors, cli.elevators
    );
    println!();

    let mut world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(cli.floors, cli.elevators, cli.spawn_rate, seed),
        None => SimWorld::new(cli.floors, cli.elevators, cli.spawn_rate),
    };

    println!("Initial state:");
    world.print_summary();
    world.draw_shaft();
    println!();

    // Report after every 10 seconds of simulated time
    let ticks_per_report = (10.0 / cli.delta).ceil() as u32;
    let mut tick = 0;
    while tick < cli.ticks {
        let ticks_to_run = ticks_per_report.min(cli.ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            world.tick(cli.delta);
        }

        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            f64::from(tick) * cli.delta
        );
        world.print_summary();
        world.draw_shaft();
        println!();
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_shaft();
    world.stats.log_summary();
}
