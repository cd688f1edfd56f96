use std::io;

use anyhow::{bail, Result};
use oximeterc3::{
    spawn_ticker, trigger_channel, Acquisition, Config, Indicator, Mode, Reporter, SampleSource,
    SyntheticSource, VirtualPin,
};

pub fn init_logging() {
    env_logger::init();
}

pub fn start(config: &Config) -> Result<u64> {
    let mut reporter = Reporter::new(io::stdout().lock());
    reporter.banner(config.mode)?;

    let source: Box<dyn SampleSource + Send> = match config.mode {
        Mode::Synthetic => Box::new(SyntheticSource::with_seed(config.seed)),
        Mode::Hardware => bail!("hardware mode needs the ESP-IDF build with a MAX30100 attached"),
    };
    let led = Indicator::new(VirtualPin::default())?;

    let (tx, rx) = trigger_channel();
    spawn_ticker(config.interval(), tx)?;

    let mut acquisition = Acquisition::new(source, led, reporter);
    acquisition.run(&rx, config.cycles)
}
