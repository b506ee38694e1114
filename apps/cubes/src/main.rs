use cubes::Cubes;
use prism::{app::run, config::Config};

mod cubes;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = Config::load()?;
    let cubes = Cubes::new(&config);
    run(cubes, config)?;
    Ok(())
}
