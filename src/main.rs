use std::error::Error;
use std::io;

use maze_walk_types::grid::dimensions::CanonicalMaze;
use maze_walk_types::walk::{explore, PrintingObserver, WalkConfig};
use maze_walk_types::wire_representation::MazeSpec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut grid = MazeSpec::canonical().to_grid_with_dimensions::<CanonicalMaze>()?;
    let stdout = io::stdout();
    let mut printer = PrintingObserver::new(stdout.lock());

    printer.announce_start(&grid);
    explore(&mut grid, &WalkConfig::default(), &mut printer)?;
    printer.announce_finish(&grid);

    printer.into_inner()?;
    Ok(())
}
