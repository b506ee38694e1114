use prism::{app::run, config::Config};
use rectangle::Rectangle;

mod rectangle;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut config = Config::load()?;
    config.window.capture_cursor = false;
    let wireframe = config.graphics.wireframe;
    run(Rectangle::new(wireframe), config)?;
    Ok(())
}
