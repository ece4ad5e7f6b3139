//! Moniker Interop - load native libraries by logical name.
//!
//! Callers register, under a platform-independent moniker, which concrete
//! file implements a library on each (platform, architecture) pair. At load
//! time the entry matching the running process is resolved, opened with the
//! host dynamic loader and the requested export is bound to a typed function
//! pointer.
//!
//! # Example
//!
//! ```rust,ignore
//! use moniker_interop::{ModuleMapping, Platform, Architecture};
//!
//! moniker_interop::register(
//!     "zlib",
//!     vec![
//!         ModuleMapping::new(Platform::Windows, Architecture::X64, "zlib1.dll"),
//!         ModuleMapping::new(Platform::Unix, Architecture::X64, "libz.so.1"),
//!         ModuleMapping::new(Platform::Mac, Architecture::X64, "libz.1.dylib"),
//!     ],
//! )?;
//!
//! type ZlibVersion = unsafe extern "C" fn() -> *const std::ffi::c_char;
//! let zlib_version = unsafe { moniker_interop::load_as_callable::<ZlibVersion>("zlib", "zlibVersion")? };
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod platform;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use error::{FailureReason, InteropError, Result};
pub use loader::{ModuleLoader, NativeLibrary, NativeSignature, Symbol};
pub use platform::{current_architecture, current_platform, Architecture, Environment, Platform};
pub use registry::{MappingTemplate, ModuleMapping, ModuleRegistry};
pub use resolver::ModuleResolver;

/// Append `mappings` for `moniker` to the process-wide registry.
///
/// See [`ModuleRegistry::register`].
pub fn register<'m>(
    moniker: impl Into<Option<&'m str>>,
    mappings: impl Into<Option<Vec<ModuleMapping>>>,
) -> Result<()> {
    ModuleRegistry::global().register(moniker, mappings)
}

/// Resolve `moniker` against the process-wide registry for the running
/// process's platform and architecture.
///
/// See [`ModuleResolver::resolve`].
pub fn resolve<'m>(moniker: impl Into<Option<&'m str>>) -> Result<String> {
    ModuleResolver::current()?.resolve(moniker)
}

/// Bind `method` from the library registered as `moniker` in the
/// process-wide registry.
///
/// See [`ModuleLoader::load_as_callable`].
///
/// # Safety
///
/// `F` must match the ABI and parameter types of the exported function.
#[allow(unsafe_code)]
pub unsafe fn load_as_callable<'m, F: NativeSignature>(
    moniker: impl Into<Option<&'m str>>,
    method: impl Into<Option<&'m str>>,
) -> Result<F> {
    let loader = ModuleLoader::current()?;
    // SAFETY: forwarded from the caller's contract.
    unsafe { loader.load_as_callable(moniker, method) }
}
