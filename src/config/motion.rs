use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::error::{MotionError, MotionResult},
    hover::wipe::HoverConfig,
    intro::preloader::PreloaderConfig,
    marquee::repeat::MarqueeConfig,
    profile::responsive::ResponsiveProfiles,
    reveal::observer::ObserveOptions,
};

/// Every tunable of the page choreography.
///
/// Each section is optional in JSON; missing fields take their defaults, so `{}` is a valid
/// configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    pub profiles: ResponsiveProfiles,
    pub preloader: PreloaderConfig,
    pub marquee: MarqueeConfig,
    pub hover: HoverConfig,
    pub reveal: ObserveOptions,
}

impl MotionConfig {
    /// Parse from JSON. Does not validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> MotionResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MotionError::serde(format!("parse motion config JSON: {e}")))
    }

    /// Parse from a JSON file on disk. Does not validate.
    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MotionError::config(format!("open motion config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> MotionResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MotionError::serde(format!("serialize motion config: {e}")))
    }

    pub fn validate(&self) -> MotionResult<()> {
        self.profiles.validate()?;
        self.preloader.validate()?;
        self.marquee.validate()?;
        self.hover.validate()?;
        self.reveal.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/motion.rs"]
mod tests;
