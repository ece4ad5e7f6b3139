//! Mapping entries registered under a moniker.

use crate::platform::{Architecture, Environment, Platform};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A (platform, architecture, locator) triple.
///
/// The locator is opaque to the registry and resolver; only the loader
/// interprets it as a file path or loader search name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleMapping {
    platform: Platform,
    architecture: Architecture,
    #[serde(alias = "name")]
    locator: String,
}

impl ModuleMapping {
    pub fn new(platform: Platform, architecture: Architecture, locator: impl Into<String>) -> Self {
        Self {
            platform,
            architecture,
            locator: locator.into(),
        }
    }

    /// Entries for every (platform, architecture) pair using the
    /// conventional `{stem}_{arch}.{ext}` file names.
    ///
    /// When `directory` is given, each locator is joined onto it.
    pub fn conventional(stem: &str, directory: Option<&Path>) -> Vec<Self> {
        Platform::ALL
            .into_iter()
            .flat_map(|platform| {
                Architecture::ALL.into_iter().map(move |architecture| {
                    let file_name = platform.library_file_name(stem, architecture);
                    let locator = match directory {
                        Some(dir) => dir.join(file_name).to_string_lossy().into_owned(),
                        None => file_name,
                    };
                    Self::new(platform, architecture, locator)
                })
            })
            .collect()
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn matches(&self, environment: &Environment) -> bool {
        self.platform == environment.platform && self.architecture == environment.architecture
    }
}
