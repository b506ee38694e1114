use prism::{app::run, config::Config};
use triangle::Triangle;

mod triangle;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut config = Config::load()?;
    config.window.capture_cursor = false;
    run(Triangle::default(), config)?;
    Ok(())
}
