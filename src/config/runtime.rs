use std::sync::OnceLock;

use crate::{config::motion::MotionConfig, foundation::error::MotionResult};

static GLOBAL: OnceLock<Runtime> = OnceLock::new();

/// Validated configuration shared by every mount.
///
/// Pages take a `&Runtime`; components never look up a global on their own.
#[derive(Clone, Debug, PartialEq)]
pub struct Runtime {
    config: MotionConfig,
}

impl Runtime {
    pub fn new(config: MotionConfig) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Install the process-wide runtime on first call.
    ///
    /// Later calls return the installed runtime and ignore `config`.
    pub fn global(config: MotionConfig) -> MotionResult<&'static Runtime> {
        if let Some(rt) = GLOBAL.get() {
            tracing::trace!("runtime already installed");
            return Ok(rt);
        }
        let rt = Self::new(config)?;
        Ok(GLOBAL.get_or_init(|| {
            tracing::debug!("runtime installed");
            rt
        }))
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/runtime.rs"]
mod tests;
