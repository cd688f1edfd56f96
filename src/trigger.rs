//! Acquisition cycle and the events that drive it.
//!
//! Producers (the synthetic ticker or the data-ready interrupt forwarder)
//! only post [`Trigger`]s into a one-slot channel; a trigger that arrives
//! while another is still pending is dropped. A single consumer owns the LED, the
//! sample source and the console, and runs one toggle/acquire/report cycle
//! per event.

use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use embedded_hal::digital::OutputPin;
use log::*;

use crate::indicator::Indicator;
use crate::report::Reporter;
use crate::sample::Sample;
use crate::source::SampleSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Timer expiry.
    Tick,
    /// SpO2-ready edge from the sensor.
    Edge,
}

enum Fault {
    Acquire(anyhow::Error),
    Console(io::Error),
}

impl Fault {
    fn into_error(self) -> anyhow::Error {
        match self {
            Fault::Acquire(e) => e,
            Fault::Console(e) => anyhow::Error::new(e).context("writing sample to console"),
        }
    }
}

pub struct Acquisition<P, W> {
    source: Box<dyn SampleSource + Send>,
    led: Indicator<P>,
    reporter: Reporter<W>,
    handled: u64,
}

impl<P, W> Acquisition<P, W>
where
    P: OutputPin,
    P::Error: Debug,
    W: Write,
{
    pub fn new(source: Box<dyn SampleSource + Send>, led: Indicator<P>, reporter: Reporter<W>) -> Self {
        Self {
            source,
            led,
            reporter,
            handled: 0,
        }
    }

    /// One full cycle: toggle the LED, take a sample, print it.
    pub fn on_trigger(&mut self, trigger: Trigger) -> Result<Sample> {
        self.cycle(trigger).map_err(Fault::into_error)
    }

    fn cycle(&mut self, trigger: Trigger) -> Result<Sample, Fault> {
        self.handled += 1;
        trace!("trigger {trigger:?} #{}", self.handled);

        if let Err(e) = self.led.toggle() {
            warn!("Failed to toggle LED: {e:?}");
        }

        let sample = self
            .source
            .acquire()
            .with_context(|| format!("{} acquisition failed", self.source.mode()))
            .map_err(Fault::Acquire)?;
        self.reporter.report(&sample).map_err(Fault::Console)?;
        Ok(sample)
    }

    /// Handle events until the producer hangs up or `limit` events were seen.
    /// Returns the number of events handled.
    pub fn run(&mut self, events: &Receiver<Trigger>, limit: Option<u64>) -> Result<u64> {
        let mut seen = 0;
        while limit.map_or(true, |limit| seen < limit) {
            let Ok(trigger) = events.recv() else {
                info!("trigger source closed");
                break;
            };
            seen += 1;

            match self.cycle(trigger) {
                Ok(_) => {}
                Err(Fault::Acquire(e)) => warn!("{e:#}"),
                Err(fault @ Fault::Console(_)) => return Err(fault.into_error()),
            }
        }
        debug!("handled {seen} triggers");
        Ok(seen)
    }

    pub fn handled(&self) -> u64 {
        self.handled
    }

    pub fn indicator(&self) -> &Indicator<P> {
        &self.led
    }

    pub fn reporter(&self) -> &Reporter<W> {
        &self.reporter
    }

    pub fn into_parts(self) -> (Indicator<P>, Reporter<W>) {
        (self.led, self.reporter)
    }
}

/// Event channel holding at most one pending trigger.
pub fn trigger_channel() -> (SyncSender<Trigger>, Receiver<Trigger>) {
    mpsc::sync_channel(1)
}

/// Never blocks. Returns `false` once the consumer is gone.
pub fn post(tx: &SyncSender<Trigger>, trigger: Trigger) -> bool {
    match tx.try_send(trigger) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            trace!("{trigger:?} dropped, previous trigger still pending");
            true
        }
        Err(TrySendError::Disconnected(_)) => false,
    }
}

/// Synthetic-mode timer: one [`Trigger::Tick`] per `period` until the receiver is dropped.
pub fn spawn_ticker(period: Duration, tx: SyncSender<Trigger>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("ticker".into())
        .stack_size(4096)
        .spawn(move || loop {
            thread::sleep(period);
            if !post(&tx, Trigger::Tick) {
                break;
            }
        })
}
