use serde::Deserialize;
use hookgate_core::error::{HookgateError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookgateConfig {
    pub version: u32,

    #[serde(default)]
    pub dispatch: DispatchSection,
}

impl HookgateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HookgateError::UnsupportedVersion);
        }
        Ok(())
    }
}

impl Default for HookgateConfig {
    fn default() -> Self {
        Self {
            version: 1,
            dispatch: DispatchSection::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchSection {
    /// How the lifecycle pipeline runs after-hooks.
    #[serde(default)]
    pub after_mode: AfterMode,

    /// Refuse to start when a callback is bound to a kind no message has.
    #[serde(default)]
    pub fail_on_unknown_kind: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterMode {
    /// Await the after-hook before the pipeline returns.
    #[default]
    Inline,
    /// Spawn the after-hook and return right away.
    Detached,
}
