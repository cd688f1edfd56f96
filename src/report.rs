use std::io::{self, Write};

use crate::config::Mode;
use crate::sample::Sample;

/// Serial terminals expect CR LF.
pub const LINE_END: &str = "\r\n";

/// Writes one text line per sample to the console.
pub struct Reporter<W> {
    out: W,
    lines: u64,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    pub fn banner(&mut self, mode: Mode) -> io::Result<()> {
        write!(
            self.out,
            "Starting MAX30100 Pulse Oximeter ({} mode)...{LINE_END}",
            mode.label()
        )?;
        self.out.flush()
    }

    pub fn report(&mut self, sample: &Sample) -> io::Result<()> {
        write!(self.out, "{sample}{LINE_END}")?;
        self.out.flush()?;
        self.lines += 1;
        Ok(())
    }

    /// Samples written so far; the banner is not counted.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
