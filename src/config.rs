use std::env::VarError;
use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::*;
use serde::Deserialize;

/// Environment variable holding the JSON configuration.
pub const CONFIG_ENV: &str = "OXIMETER_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Generated readings, no sensor attached.
    #[default]
    Synthetic,
    /// MAX30100 on I2C, paced by its data-ready interrupt.
    Hardware,
}

impl Mode {
    /// Banner wording.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Synthetic => "SIMULATION",
            Mode::Hardware => "HARDWARE",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode: Mode,
    /// Synthetic trigger period.
    pub interval_ms: u64,
    /// Fixed generator seed; fresh entropy when absent.
    pub seed: Option<u64>,
    /// Stop after this many triggers.
    pub cycles: Option<u64>,
    pub i2c_khz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Synthetic,
            interval_ms: 1000,
            seed: None,
            cycles: None,
            i2c_khz: 400,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json).context("parsing configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Run-time environment first, then the value captured at build time.
    pub fn load() -> Result<Self> {
        Self::from_env_value(std::env::var(CONFIG_ENV))
    }

    fn from_env_value(value: Result<String, VarError>) -> Result<Self> {
        match value {
            Ok(json) => {
                debug!("configuration from environment");
                return Self::from_json(&json);
            }
            Err(VarError::NotUnicode(_)) => bail!("{CONFIG_ENV} is not valid Unicode"),
            Err(VarError::NotPresent) => {}
        }
        match option_env!("OXIMETER_CONFIG") {
            Some(json) => {
                debug!("configuration from build environment");
                Self::from_json(json)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            bail!("interval_ms must be greater than zero");
        }
        if self.i2c_khz == 0 {
            bail!("i2c_khz must be greater than zero");
        }
        Ok(())
    }
}
