//! Loading native libraries by moniker and binding their exports.
//!
//! A load runs `Resolving → Opening → SymbolLookup → Binding`; the first
//! failure ends the call and is returned unchanged. Nothing is cached: every
//! call resolves and opens the library again.
//!
//! # Retention
//!
//! - [`ModuleLoader::load_as_callable`] returns a bare function pointer, so the
//!   library it came from is leaked and stays loaded until process exit.
//! - [`ModuleLoader::load_library`] returns an owning [`NativeLibrary`] that
//!   releases the handle on drop; bound symbols borrow it.

#![allow(unsafe_code)]

mod library;
mod signature;

pub use library::{NativeLibrary, Symbol};
pub use signature::NativeSignature;

use crate::error::{InteropError, Result};
use crate::platform::Environment;
use crate::registry::ModuleRegistry;
use crate::resolver::ModuleResolver;
use tracing::debug;

/// Loads libraries registered under a moniker for one environment.
#[derive(Debug, Clone, Copy)]
pub struct ModuleLoader<'r> {
    resolver: ModuleResolver<'r>,
}

impl<'r> ModuleLoader<'r> {
    pub fn new(registry: &'r ModuleRegistry, environment: Environment) -> Self {
        Self {
            resolver: ModuleResolver::new(registry, environment),
        }
    }

    pub fn from_resolver(resolver: ModuleResolver<'r>) -> Self {
        Self { resolver }
    }

    /// Loader over the process-wide registry and the detected environment.
    pub fn current() -> Result<ModuleLoader<'static>> {
        ModuleResolver::current().map(ModuleLoader::from_resolver)
    }

    pub fn resolver(&self) -> &ModuleResolver<'r> {
        &self.resolver
    }

    /// Resolve `moniker` and open the library it maps to.
    ///
    /// # Errors
    /// Resolution errors unchanged, or
    /// [`InteropError::ModuleCouldNotBeLoaded`] with the resolved locator.
    pub fn load_library<'m>(&self, moniker: impl Into<Option<&'m str>>) -> Result<NativeLibrary> {
        let locator = self.resolver.resolve(moniker)?;
        NativeLibrary::open(&locator)
    }

    /// Resolve `moniker`, open its library and bind `method` as `F`.
    ///
    /// The library is kept loaded for the rest of the process so the
    /// returned pointer stays valid.
    ///
    /// # Safety
    ///
    /// `F` must match the ABI and parameter types of the exported function.
    ///
    /// # Errors
    /// - [`InteropError::NullMoniker`] if `moniker` is absent
    /// - `InvalidArgument("method")` if `method` is absent or blank
    /// - [`InteropError::InvalidMoniker`] if nothing is registered for this
    ///   environment
    /// - [`InteropError::ModuleCouldNotBeLoaded`] if the library cannot be opened
    /// - [`InteropError::MethodMissing`] if the export does not exist
    /// - [`InteropError::MethodCouldNotBeLoaded`] if it cannot be bound as `F`
    pub unsafe fn load_as_callable<'m, F: NativeSignature>(
        &self,
        moniker: impl Into<Option<&'m str>>,
        method: impl Into<Option<&'m str>>,
    ) -> Result<F> {
        let moniker = moniker.into().ok_or(InteropError::NullMoniker)?;
        let method = method
            .into()
            .filter(|method| !method.trim().is_empty())
            .ok_or_else(|| InteropError::invalid_argument("method"))?;

        let library = self.load_library(moniker)?;
        // SAFETY: forwarded from the caller's contract; the library is leaked
        // below so the pointer never dangles.
        let callable = unsafe { library.bind::<F>(method) }?;

        debug!(
            "Bound '{}' from moniker '{}' ({})",
            method,
            moniker,
            library.locator()
        );
        library.leak();
        Ok(callable)
    }
}
