//! Oink config loader (strict parsing).

pub mod schema;

use std::fs;

use oink_core::error::{OinkError, Result};

pub use schema::{OinkConfig, OinkSection, ServerSection, SinkKind};

pub fn load_from_file(path: &str) -> Result<OinkConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| OinkError::BadConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<OinkConfig> {
    let cfg: OinkConfig = serde_yaml::from_str(s)
        .map_err(|e| OinkError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
