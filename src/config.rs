//! Layered configuration.
//!
//! Sources, highest priority last:
//! 1. Built-in defaults
//! 2. `folio.toml` in the working directory, or the file given with `--config`
//! 3. Environment variables with the `FOLIO_` prefix, `__` separating
//!    sections (`FOLIO_LAYOUT__MOBILE_BREAKPOINT=640` -> `layout.mobile_breakpoint`)

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::core::ambient::MotionPreference;
use crate::core::boundary::GraphicsSupport;
use crate::core::dropdown::DropdownOptions;
use crate::core::header::{DEFAULT_MOBILE_BREAKPOINT, DEFAULT_SCROLLED_THRESHOLD};
use crate::core::modal::ModalOptions;
use crate::core::reveal::DEFAULT_THRESHOLD;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";
pub const ENV_PREFIX: &str = "FOLIO_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub dropdown: DropdownOptions,
    #[serde(default)]
    pub modal: ModalOptions,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub ambient: AmbientConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of a section that must be on screen before it reveals.
    pub threshold: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Widths up to and including this are laid out for mobile.
    pub mobile_breakpoint: f32,
    pub scrolled_threshold: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            scrolled_threshold: DEFAULT_SCROLLED_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Unset means full motion; there is no OS preference to query here.
    pub reduced_motion: Option<bool>,
    /// Fixed seed for the decorative layer. Unset draws one per launch.
    pub seed: Option<u64>,
    pub graphics: GraphicsSupport,
}

impl AmbientConfig {
    pub fn motion(&self) -> MotionPreference {
        MotionPreference::from_reduced(self.reduced_motion.unwrap_or(false))
    }

    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

impl FolioConfig {
    /// Load and validate from all sources.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(file).extract()?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Build the provider chain. An explicit file must exist; the default
    /// `folio.toml` is optional.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match file {
            Some(path) => figment = figment.merge(Toml::file_exact(path)),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    figment = figment.merge(Toml::file(local));
                }
            }
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.reveal.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(invalid("reveal.threshold", format!("{threshold} is outside (0, 1]")));
        }
        if self.layout.mobile_breakpoint <= 0.0 {
            return Err(invalid("layout.mobile_breakpoint", "must be positive"));
        }
        if self.layout.scrolled_threshold < 0.0 {
            return Err(invalid("layout.scrolled_threshold", "must not be negative"));
        }
        if self.dropdown.gap < 0.0 {
            return Err(invalid("dropdown.gap", "must not be negative"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
