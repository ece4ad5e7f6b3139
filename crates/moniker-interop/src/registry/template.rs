//! Versioned locator templates.
//!
//! Environment-discovery code (toolkit detection, install scanners) knows a
//! library's file name only up to a version component. It declares templates
//! such as `cudart64_{version}.dll` and expands them once the version is known,
//! so the registry only ever holds placeholder-free locators.

use super::ModuleMapping;
use crate::config::LoaderConfig;
use crate::error::{InteropError, Result};
use crate::platform::{Architecture, Platform};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Any `{identifier}` left in a locator after expansion.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[A-Za-z_][A-Za-z0-9_]*\}").expect("placeholder regex must compile")
});

/// A mapping whose locator may contain the `{version}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTemplate {
    pub platform: Platform,
    pub architecture: Architecture,
    pub template: String,
}

impl MappingTemplate {
    pub fn new(platform: Platform, architecture: Architecture, template: impl Into<String>) -> Self {
        Self {
            platform,
            architecture,
            template: template.into(),
        }
    }

    pub fn is_versioned(&self) -> bool {
        self.template.contains(LoaderConfig::VERSION_PLACEHOLDER)
    }

    /// Substitute `version` for every `{version}` placeholder.
    ///
    /// # Errors
    /// - `InvalidArgument("version")` if `version` is blank
    /// - `InvalidArgument("template")` if another placeholder survives expansion
    pub fn expand(&self, version: &str) -> Result<ModuleMapping> {
        let version = version.trim();
        if version.is_empty() {
            return Err(InteropError::invalid_argument("version"));
        }

        let locator = self
            .template
            .replace(LoaderConfig::VERSION_PLACEHOLDER, version);

        if PLACEHOLDER.is_match(&locator) {
            return Err(InteropError::invalid_argument("template"));
        }

        Ok(ModuleMapping::new(self.platform, self.architecture, locator))
    }
}
