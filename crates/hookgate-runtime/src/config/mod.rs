//! Runtime config loader (strict parsing).

pub mod schema;

use std::fs;

use hookgate_core::error::{HookgateError, Result};

pub use schema::{AfterMode, DispatchSection, HookgateConfig};

pub fn load_from_file(path: &str) -> Result<HookgateConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| HookgateError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<HookgateConfig> {
    let cfg: HookgateConfig = serde_yaml::from_str(s)
        .map_err(|e| HookgateError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
