//! Moniker resolution.
//!
//! Selects the locator registered for the environment a resolver was built
//! with. Resolution is a pure read of the registry: it never registers,
//! caches or logs above `debug`.

use crate::error::{InteropError, Result};
use crate::platform::Environment;
use crate::registry::ModuleRegistry;
use tracing::debug;

/// Resolves monikers against a registry for one fixed environment.
#[derive(Debug, Clone, Copy)]
pub struct ModuleResolver<'r> {
    registry: &'r ModuleRegistry,
    environment: Environment,
}

impl<'r> ModuleResolver<'r> {
    pub fn new(registry: &'r ModuleRegistry, environment: Environment) -> Self {
        Self {
            registry,
            environment,
        }
    }

    /// Resolver over the process-wide registry and the detected environment.
    pub fn current() -> Result<ModuleResolver<'static>> {
        Ok(ModuleResolver::new(
            ModuleRegistry::global(),
            Environment::current()?,
        ))
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn registry(&self) -> &'r ModuleRegistry {
        self.registry
    }

    /// Locator of the first entry registered for `moniker` whose platform and
    /// architecture equal this resolver's environment.
    ///
    /// # Errors
    /// - [`InteropError::NullMoniker`] if `moniker` is absent
    /// - [`InteropError::InvalidMoniker`] if the moniker is unknown or has no
    ///   entry for this environment; the two cases are not distinguished
    pub fn resolve<'m>(&self, moniker: impl Into<Option<&'m str>>) -> Result<String> {
        let moniker = moniker.into().ok_or(InteropError::NullMoniker)?;

        let locator = self
            .registry
            .find(moniker, &self.environment)
            .ok_or_else(|| InteropError::invalid_moniker(moniker))?;

        debug!(
            "Resolved moniker '{}' to '{}' for {}",
            moniker, locator, self.environment
        );
        Ok(locator)
    }
}
