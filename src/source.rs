//! Where samples come from: the real sensor or a generator standing in for it.

use std::ops::Range;

use anyhow::{Context, Result};
use embedded_hal::i2c::I2c;
use log::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Mode;
use crate::max30100::Max30100;
use crate::sample::Sample;

pub const SYNTHETIC_INFRARED: Range<u16> = 25000..26000;
pub const SYNTHETIC_RED: Range<u16> = 26000..27000;

pub trait SampleSource {
    fn acquire(&mut self) -> Result<Sample>;

    fn mode(&self) -> Mode;
}

/// Pseudo-random readings in the ranges a resting finger produces.
pub struct SyntheticSource<R> {
    rng: R,
}

impl SyntheticSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when a seed is configured, otherwise from entropy.
    pub fn with_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl<R: Rng> SyntheticSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SampleSource for SyntheticSource<R> {
    fn acquire(&mut self) -> Result<Sample> {
        Ok(Sample::new(
            self.rng.gen_range(SYNTHETIC_INFRARED),
            self.rng.gen_range(SYNTHETIC_RED),
        ))
    }

    fn mode(&self) -> Mode {
        Mode::Synthetic
    }
}

/// Reads frames from a MAX30100 on the given bus.
pub struct SensorSource<I2C> {
    sensor: Max30100<I2C>,
}

impl<I2C> SensorSource<I2C>
where
    I2C: I2c,
    I2C::Error: Send + Sync + 'static,
{
    /// Runs the register setup once before any frame is read.
    pub fn new(i2c: I2C) -> Result<Self> {
        let mut sensor = Max30100::new(i2c);
        sensor.configure().context("configuring MAX30100")?;
        Ok(Self { sensor })
    }

    pub fn release(self) -> I2C {
        self.sensor.release()
    }
}

impl<I2C> SampleSource for SensorSource<I2C>
where
    I2C: I2c,
    I2C::Error: Send + Sync + 'static,
{
    fn acquire(&mut self) -> Result<Sample> {
        let sample = self.sensor.read_sample()?;
        trace!("sensor sample {sample:?}");
        Ok(sample)
    }

    fn mode(&self) -> Mode {
        Mode::Hardware
    }
}
