//! MAX30100 pulse oximeter front-end.
//!
//! Every trigger (a timer tick in simulation, the sensor's data-ready
//! interrupt on hardware) toggles the status LED, reads one infrared/red
//! frame and prints it as a line on the console.

pub mod config;
pub mod indicator;
pub mod max30100;
pub mod report;
pub mod sample;
pub mod source;
pub mod trigger;

pub use config::{Config, Mode};
pub use indicator::{Indicator, VirtualPin};
pub use max30100::Max30100;
pub use report::Reporter;
pub use sample::Sample;
pub use source::{SampleSource, SensorSource, SyntheticSource};
pub use trigger::{post, spawn_ticker, trigger_channel, Acquisition, Trigger};
