//! Host dynamic-loader primitives.
//!
//! Opening and symbol lookup go through `libloading`. The Unix path uses the
//! platform-specific constructor so the open flags from
//! [`LoaderConfig::UNIX_OPEN_FLAGS`] apply; ownership and release are managed
//! by [`crate::loader::NativeLibrary`].

#![allow(unsafe_code)]

#[cfg(unix)]
use crate::config::LoaderConfig;
use crate::error::{InteropError, Result};
use libloading::{Library, Symbol};
use std::ffi::c_void;
use tracing::debug;

/// Open the shared library at `locator`.
///
/// # Platform Behavior
/// - **Linux/macOS**: `dlopen(locator, RTLD_LAZY)`
/// - **Windows**: `LoadLibraryW(locator)`
///
/// # Errors
/// [`InteropError::ModuleCouldNotBeLoaded`] if the loader returns no handle.
pub(crate) fn open(locator: &str) -> Result<Library> {
    // SAFETY: library initializers run here; callers accept that by loading.
    let opened = unsafe { open_host(locator) };

    opened.map_err(|e| {
        debug!("Failed to open {}: {}", locator, e);
        InteropError::ModuleCouldNotBeLoaded {
            locator: locator.to_string(),
        }
    })
}

#[cfg(unix)]
unsafe fn open_host(locator: &str) -> std::result::Result<Library, libloading::Error> {
    // SAFETY: forwarded from the caller.
    unsafe { libloading::os::unix::Library::open(Some(locator), LoaderConfig::UNIX_OPEN_FLAGS) }
        .map(Library::from)
}

#[cfg(windows)]
unsafe fn open_host(locator: &str) -> std::result::Result<Library, libloading::Error> {
    // SAFETY: forwarded from the caller.
    unsafe { libloading::os::windows::Library::new(locator) }.map(Library::from)
}

/// Look up an exported symbol as an untyped address.
///
/// Returns `None` when the library does not export `method`.
///
/// # Platform Behavior
/// - **Linux/macOS**: `dlsym`
/// - **Windows**: `GetProcAddress`
pub(crate) fn lookup<'lib>(
    library: &'lib Library,
    method: &str,
) -> Option<Symbol<'lib, *mut c_void>> {
    // SAFETY: the symbol is read as a raw address and never called here.
    match unsafe { library.get::<*mut c_void>(method.as_bytes()) } {
        Ok(symbol) if !symbol.is_null() => Some(symbol),
        Ok(_) => None,
        Err(e) => {
            debug!("Lookup of '{}' failed: {}", method, e);
            None
        }
    }
}
