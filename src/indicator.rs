use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use log::*;

/// Status LED that flips on every acquisition.
pub struct Indicator<P> {
    led: P,
    on: bool,
    toggles: u64,
}

impl<P: OutputPin> Indicator<P> {
    /// Starts dark.
    pub fn new(mut led: P) -> Result<Self, P::Error> {
        led.set_low()?;
        Ok(Self {
            led,
            on: false,
            toggles: 0,
        })
    }

    pub fn set_led(&mut self, on: bool) -> Result<(), P::Error> {
        self.led.set_state(PinState::from(on))?;
        self.on = on;
        Ok(())
    }

    /// Counted only once the pin actually changed.
    pub fn toggle(&mut self) -> Result<(), P::Error> {
        self.set_led(!self.on)?;
        self.toggles += 1;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn toggles(&self) -> u64 {
        self.toggles
    }
}

/// Stand-in for boards without a user LED.
#[derive(Debug, Default)]
pub struct VirtualPin {
    high: bool,
}

impl VirtualPin {
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for VirtualPin {
    type Error = Infallible;
}

impl OutputPin for VirtualPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        trace!("led off");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        trace!("led on");
        Ok(())
    }
}
