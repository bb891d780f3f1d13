/*
 * Bird Simulation (headless)
 *
 * Steps the simulation for a fixed number of ticks without opening a window
 * and logs a summary of the run. Useful for checking that a seed and a
 * parameter file behave as expected before watching them in the viewer.
 */

use birds::cli::{init_tracing, ParamArgs};
use birds::Simulation;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "birds")]
#[command(about = "Run the bird simulation headless and report the outcome")]
struct Args {
    #[command(flatten)]
    params: ParamArgs,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Print one line per bird after the run
    #[arg(long)]
    report: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let params = args.params.resolve()?;
    let mut sim = Simulation::from_params(params)?;

    for _ in 0..args.ticks {
        sim.step();
    }
    sim.stop();

    let stats = sim.stats();
    info!(
        ticks = stats.ticks,
        food_eaten = stats.food_eaten,
        birds = sim.birds().len(),
        food = sim.food().len(),
        "run finished"
    );

    if args.report {
        for (index, bird) in sim.birds().iter().enumerate() {
            let position = bird.position();
            println!(
                "bird {:>3}  x {:>7.2}  y {:>7.2}  heading {:>6.2}  speed {:.1}  meals {}  sees {}",
                index,
                position.x,
                position.y,
                birds::geometry::normalize_angle(bird.heading()),
                bird.speed(),
                bird.meals(),
                sim.visible_food(bird).count(),
            );
        }
    }

    Ok(())
}
