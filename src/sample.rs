use std::fmt;

/// Size of one FIFO data frame: two big-endian 16-bit channel values.
pub const FRAME_LEN: usize = 4;

/// One infrared/red reading pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub infrared: u16,
    pub red: u16,
}

impl Sample {
    pub fn new(infrared: u16, red: u16) -> Self {
        Self { infrared, red }
    }

    /// Bytes 0..2 hold the infrared value and bytes 2..4 the red value, MSB first.
    pub fn from_frame(frame: [u8; FRAME_LEN]) -> Self {
        Self {
            infrared: u16::from_be_bytes([frame[0], frame[1]]),
            red: u16::from_be_bytes([frame[2], frame[3]]),
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IR Value: {}, RED Value: {}", self.infrared, self.red)
    }
}
