use serde::Deserialize;

use oink_core::error::{OinkError, Result};
use oink_core::{Instrument, InstrumentSet, MemoryKind};

use crate::sink::DEFAULT_LOG_PATH;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OinkConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub oink: OinkSection,
}

impl OinkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OinkError::UnsupportedVersion);
        }
        self.oink.validate()?;
        Ok(())
    }
}

impl Default for OinkConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            oink: OinkSection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Where report lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// Hodel 3000 compliant file at `log_path`.
    #[default]
    File,
    /// `tracing` events under target `oink`.
    Tracing,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OinkSection {
    #[serde(default)]
    pub sink: SinkKind,

    #[serde(default = "default_log_path")]
    pub log_path: String,

    /// Absent => every known instrument. Unknown names are accepted and inert.
    #[serde(default)]
    pub instruments: Option<Vec<Instrument>>,

    #[serde(default)]
    pub memory_source: MemoryKind,
}

impl Default for OinkSection {
    fn default() -> Self {
        Self {
            sink: SinkKind::default(),
            log_path: default_log_path(),
            instruments: None,
            memory_source: MemoryKind::default(),
        }
    }
}

impl OinkSection {
    pub fn validate(&self) -> Result<()> {
        if self.sink == SinkKind::File && self.log_path.trim().is_empty() {
            return Err(OinkError::BadConfig(
                "oink.log_path must not be empty when oink.sink is file".into(),
            ));
        }
        Ok(())
    }

    pub fn instrument_set(&self) -> InstrumentSet {
        InstrumentSet::resolve(self.instruments.clone())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_log_path() -> String {
    DEFAULT_LOG_PATH.into()
}
