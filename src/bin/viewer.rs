/*
 * Bird Simulation Viewer
 *
 * Opens a window showing the birds, the food and each bird's view cone.
 * The "View" and "Lines" toggles in the control panel switch the cone arcs
 * and the lines to visible food on and off.
 */

use birds::cli::{init_tracing, ParamArgs};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "birds-viewer")]
#[command(about = "Watch the bird simulation in a window")]
struct Args {
    #[command(flatten)]
    params: ParamArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();
    let params = args.params.resolve()?;
    birds::app::run(params)?;
    Ok(())
}
