use std::io;
use std::num::NonZeroU32;
use std::sync::mpsc::SyncSender;
use std::thread::JoinHandle;

use anyhow::Result;
use esp_idf_svc::hal::{
    delay::BLOCK,
    gpio::{Gpio3, InterruptType, PinDriver, Pull},
    i2c::{I2cConfig, I2cDriver},
    prelude::*,
    task::notification::Notification,
};
use log::*;
use oximeterc3::{
    post, spawn_ticker, trigger_channel, Acquisition, Config, Indicator, Mode, Reporter,
    SampleSource, SensorSource, SyntheticSource, Trigger,
};

pub fn init_logging() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
}

/// LED on GPIO20, sensor INT on GPIO3, I2C0 on GPIO4 (SDA) / GPIO5 (SCL).
pub fn start(config: &Config) -> Result<u64> {
    let peripherals = Peripherals::take()?;

    let mut reporter = Reporter::new(io::stdout());
    reporter.banner(config.mode)?;

    let led = Indicator::new(PinDriver::output(peripherals.pins.gpio20)?)?;
    let (tx, rx) = trigger_channel();

    let source: Box<dyn SampleSource + Send> = match config.mode {
        Mode::Synthetic => {
            spawn_ticker(config.interval(), tx)?;
            Box::new(SyntheticSource::with_seed(config.seed))
        }
        Mode::Hardware => {
            let i2c_config = I2cConfig::new().baudrate(config.i2c_khz.kHz().into());
            let i2c = I2cDriver::new(
                peripherals.i2c0,
                peripherals.pins.gpio4,
                peripherals.pins.gpio5,
                &i2c_config,
            )?;
            let source = SensorSource::new(i2c)?;
            spawn_edge_forwarder(peripherals.pins.gpio3, tx)?;
            Box::new(source)
        }
    };

    let mut acquisition = Acquisition::new(source, led, reporter);
    acquisition.run(&rx, config.cycles)
}

// The ISR only signals; the thread turns each signal into a trigger event.
fn spawn_edge_forwarder(int_pin: Gpio3, tx: SyncSender<Trigger>) -> Result<JoinHandle<()>> {
    let handle = std::thread::Builder::new()
        .stack_size(4096)
        .spawn(move || {
            if let Err(e) = forward_edges(int_pin, &tx) {
                error!("Data-ready interrupt stopped: {e}");
            }
        })?;
    Ok(handle)
}

fn forward_edges(int_pin: Gpio3, tx: &SyncSender<Trigger>) -> Result<()> {
    // INT is open-drain and active-low.
    let mut int = PinDriver::input(int_pin)?;
    int.set_pull(Pull::Up)?;
    int.set_interrupt_type(InterruptType::NegEdge)?;

    let notification = Notification::new();
    let notifier = notification.notifier();
    unsafe {
        int.subscribe(move || {
            notifier.notify_and_yield(NonZeroU32::MIN);
        })?;
    }

    loop {
        int.enable_interrupt()?;
        notification.wait(BLOCK);
        if !post(tx, Trigger::Edge) {
            debug!("trigger consumer gone");
            return Ok(());
        }
    }
}
