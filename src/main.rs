#[macro_use]
extern crate log;

use std::env;
use std::process;

use env_logger::Env;

use lagoon::application::prelude::*;
use lagoon::errors::*;

fn run() -> Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "lagoon.json".to_owned());

    let settings = Settings::load(&path)?;
    let mut engine = Engine::new(settings)?;
    engine.run()?;
    engine.shutdown()?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        error!("{}", err);
        for cause in err.iter_causes() {
            error!("  caused by: {}", cause);
        }

        process::exit(1);
    }
}
