//! Append-only registry of moniker mappings.

use super::{MappingTemplate, ModuleMapping};
use crate::error::{InteropError, Result};
use crate::platform::Environment;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Thread-safe multimap from moniker to its registered mappings.
///
/// Uses an `RwLock` so registration is serialized while resolution reads a
/// consistent snapshot concurrently. Entries are never removed or mutated.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    mappings: RwLock<HashMap<String, Vec<ModuleMapping>>>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by the crate-level free functions.
    pub fn global() -> &'static ModuleRegistry {
        static GLOBAL: OnceLock<ModuleRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ModuleRegistry::new)
    }

    // Entries are append-only, so a panic mid-registration cannot leave the
    // map in a state later readers would misinterpret.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<ModuleMapping>>> {
        self.mappings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<ModuleMapping>>> {
        self.mappings.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================
    // Registration
    // ========================================

    /// Append `mappings` to the entries registered for `moniker`.
    ///
    /// An empty list is accepted and registers nothing. Earlier entries keep
    /// resolution priority over later ones.
    ///
    /// # Errors
    /// [`InteropError::InvalidArgument`] naming `moniker` or `mappings` when
    /// either is absent.
    pub fn register<'m>(
        &self,
        moniker: impl Into<Option<&'m str>>,
        mappings: impl Into<Option<Vec<ModuleMapping>>>,
    ) -> Result<()> {
        let moniker = moniker
            .into()
            .ok_or_else(|| InteropError::invalid_argument("moniker"))?;
        let mappings = mappings
            .into()
            .ok_or_else(|| InteropError::invalid_argument("mappings"))?;

        if mappings.is_empty() {
            debug!("No mappings supplied for moniker '{}'", moniker);
            return Ok(());
        }

        let count = mappings.len();
        self.write()
            .entry(moniker.to_string())
            .or_default()
            .extend(mappings);

        debug!("Registered {} mapping(s) for moniker '{}'", count, moniker);
        Ok(())
    }

    /// Expand versioned templates and register the results.
    ///
    /// Either every template expands and all are registered, or nothing is.
    pub fn register_versioned(
        &self,
        moniker: &str,
        templates: &[MappingTemplate],
        version: &str,
    ) -> Result<()> {
        let mappings = templates
            .iter()
            .map(|template| template.expand(version))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Expanded {} template(s) for moniker '{}' with version {}",
            mappings.len(),
            moniker,
            version.trim()
        );
        self.register(moniker, mappings)
    }

    /// Register every moniker in a JSON document of the form
    /// `{"moniker": [{"platform": "Unix", "architecture": "x64", "locator": "..."}]}`.
    ///
    /// Returns the number of mappings registered.
    pub fn register_json(&self, json: &str) -> Result<usize> {
        let document: HashMap<String, Vec<ModuleMapping>> =
            serde_json::from_str(json).map_err(|e| {
                warn!("Rejected registration document: {}", e);
                InteropError::invalid_argument("mappings")
            })?;

        let mut total = 0;
        for (moniker, mappings) in document {
            total += mappings.len();
            self.register(moniker.as_str(), mappings)?;
        }
        Ok(total)
    }

    // ========================================
    // Queries
    // ========================================

    /// Locator of the first entry for `moniker` matching `environment`.
    pub fn find(&self, moniker: &str, environment: &Environment) -> Option<String> {
        self.read()
            .get(moniker)?
            .iter()
            .find(|mapping| mapping.matches(environment))
            .map(|mapping| mapping.locator().to_string())
    }

    /// Snapshot of the entries registered for `moniker`, in insertion order.
    pub fn mappings(&self, moniker: &str) -> Vec<ModuleMapping> {
        self.read().get(moniker).cloned().unwrap_or_default()
    }

    pub fn contains(&self, moniker: &str) -> bool {
        self.read().contains_key(moniker)
    }

    /// Number of registered monikers.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
