mod board;

use log::*;
use oximeterc3::Config;

fn main() -> anyhow::Result<()> {
    board::init_logging();

    let config = Config::load()?;
    info!("Starting in {} mode: {config:?}", config.mode);

    let handled = board::start(&config)?;
    info!("Stopped after {handled} triggers");
    Ok(())
}
