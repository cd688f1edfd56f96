//! MAX30100 pulse oximeter driver.
//!
//! Only the pieces the front-end needs: the one-shot register setup and the
//! FIFO frame read. The part is addressed as `0xAE` on the wire (write
//! address); `embedded-hal` takes the 7-bit form.

use core::fmt;

use embedded_hal::i2c::I2c;
use log::*;

use crate::sample::{Sample, FRAME_LEN};

/// 8-bit write address as printed in the datasheet.
pub const WRITE_ADDRESS: u8 = 0xAE;

/// 7-bit bus address handed to `embedded-hal`.
pub const ADDRESS: u8 = WRITE_ADDRESS >> 1;

pub mod regs {
    pub const INTERRUPT_ENABLE: u8 = 0x01;
    pub const FIFO_DATA: u8 = 0x05;
    pub const MODE_CONFIG: u8 = 0x06;
    pub const SPO2_CONFIG: u8 = 0x07;
}

/// Only the SpO2-ready interrupt.
pub const ENB_SPO2_RDY: u8 = 0x10;
/// SpO2 mode, both LEDs active.
pub const MODE_SPO2: u8 = 0x03;
/// HI_RES_EN, 100 samples/s, 1600us pulse width (16-bit ADC).
pub const SPO2_HI_RES_100SPS_1600US: u8 = 0x47;

/// Register writes applied once at startup, in order.
pub const STARTUP_CONFIG: [(u8, u8); 3] = [
    (regs::INTERRUPT_ENABLE, ENB_SPO2_RDY),
    (regs::MODE_CONFIG, MODE_SPO2),
    (regs::SPO2_CONFIG, SPO2_HI_RES_100SPS_1600US),
];

#[derive(Debug)]
pub enum Error<E> {
    I2c(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C transfer with MAX30100 at {ADDRESS:#04x} failed: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for Error<E> {}

pub struct Max30100<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Max30100<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(ADDRESS, &[reg, value]).map_err(Error::I2c)
    }

    /// Interrupt source, operating mode and sample rate/resolution.
    pub fn configure(&mut self) -> Result<(), Error<I2C::Error>> {
        for (reg, value) in STARTUP_CONFIG {
            debug!("write_reg {reg:#04x} = {value:#04x}");
            self.write_reg(reg, value)?;
        }
        info!("MAX30100 configured for SpO2 mode");
        Ok(())
    }

    /// Point at the FIFO data register and burst-read one frame.
    pub fn read_frame(&mut self) -> Result<[u8; FRAME_LEN], Error<I2C::Error>> {
        let mut frame = [0u8; FRAME_LEN];
        self.i2c
            .write_read(ADDRESS, &[regs::FIFO_DATA], &mut frame)
            .map_err(Error::I2c)?;
        trace!("fifo frame {frame:02x?}");
        Ok(frame)
    }

    pub fn read_sample(&mut self) -> Result<Sample, Error<I2C::Error>> {
        self.read_frame().map(Sample::from_frame)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use embedded_hal::i2c::{self, ErrorKind, ErrorType, Operation};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Transfer {
        Write(u8, Vec<u8>),
        Read(u8, usize),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BusFault;

    impl i2c::Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Bus
        }
    }

    /// Records every transfer and answers reads with `frame`.
    #[derive(Default)]
    pub struct RecordingBus {
        pub transfers: Vec<Transfer>,
        pub frame: Vec<u8>,
        pub fail: bool,
    }

    impl RecordingBus {
        pub fn with_frame(frame: &[u8]) -> Self {
            Self {
                frame: frame.to_vec(),
                ..Default::default()
            }
        }
    }

    impl ErrorType for RecordingBus {
        type Error = BusFault;
    }

    impl i2c::I2c for RecordingBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(BusFault);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        self.transfers.push(Transfer::Write(address, bytes.to_vec()))
                    }
                    Operation::Read(buf) => {
                        self.transfers.push(Transfer::Read(address, buf.len()));
                        for (dst, src) in buf.iter_mut().zip(self.frame.iter()) {
                            *dst = *src;
                        }
                    }
                }
            }
            Ok(())
        }
    }
}
