//! Owning wrapper around an open native library.

#![allow(unsafe_code)]

use super::signature::NativeSignature;
use crate::error::{InteropError, Result};
use crate::platform::native;
use libloading::Library;
use std::ffi::c_void;
use std::fmt;
use std::ops::Deref;
use std::ptr::NonNull;
use tracing::debug;

/// An open shared library.
///
/// The handle is released when the value is dropped. Callables obtained
/// through [`NativeLibrary::get`] borrow the library, so they cannot outlive
/// it. [`NativeLibrary::leak`] keeps the library loaded for the rest of the
/// process instead.
pub struct NativeLibrary {
    library: Library,
    locator: String,
}

impl NativeLibrary {
    /// Open the library at `locator` with the host loader.
    ///
    /// # Errors
    /// [`InteropError::ModuleCouldNotBeLoaded`] carrying `locator` when the
    /// loader cannot open it.
    pub fn open(locator: &str) -> Result<Self> {
        let library = native::open(locator)?;
        debug!("Opened native library '{}'", locator);
        Ok(Self {
            library,
            locator: locator.to_string(),
        })
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Check whether the library exports `method`.
    pub fn has_symbol(&self, method: &str) -> bool {
        native::lookup(&self.library, method).is_some()
    }

    /// Look up `method` and bind it to the signature `F`.
    ///
    /// # Safety
    ///
    /// `F` must match the ABI and parameter types of the exported function.
    ///
    /// # Errors
    /// - [`InteropError::MethodMissing`] if the library does not export `method`
    /// - [`InteropError::MethodCouldNotBeLoaded`] if the address cannot be
    ///   represented as `F`
    pub unsafe fn get<F: NativeSignature>(&self, method: &str) -> Result<Symbol<'_, F>> {
        let raw = self.lookup(method)?;
        let address = NonNull::new(*raw).ok_or_else(|| missing(method))?;
        // SAFETY: forwarded from the caller's contract.
        let callable = unsafe { convert::<F>(address, method) }?;
        Ok(Symbol { callable, raw })
    }

    /// # Safety
    ///
    /// Same contract as [`NativeLibrary::get`]; additionally the caller must
    /// keep the library loaded while the returned pointer is in use.
    pub(crate) unsafe fn bind<F: NativeSignature>(&self, method: &str) -> Result<F> {
        // SAFETY: forwarded from the caller's contract.
        unsafe { self.get::<F>(method) }.map(|symbol| symbol.callable)
    }

    fn lookup(&self, method: &str) -> Result<libloading::Symbol<'_, *mut c_void>> {
        native::lookup(&self.library, method).ok_or_else(|| {
            debug!("'{}' does not export '{}'", self.locator, method);
            missing(method)
        })
    }

    /// Keep the library loaded for the remainder of the process.
    ///
    /// Function pointers bound from it stay valid forever afterwards.
    pub fn leak(self) {
        debug!("Retaining native library '{}' until exit", self.locator);
        std::mem::forget(self);
    }
}

impl Drop for NativeLibrary {
    fn drop(&mut self) {
        debug!("Releasing native library '{}'", self.locator);
    }
}

impl fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("locator", &self.locator)
            .field("library", &self.library)
            .finish()
    }
}

unsafe fn convert<F: NativeSignature>(address: NonNull<c_void>, method: &str) -> Result<F> {
    // SAFETY: forwarded from the caller's contract.
    unsafe { F::from_address(address) }.ok_or_else(|| {
        debug!("'{}' cannot be bound to the requested signature", method);
        InteropError::MethodCouldNotBeLoaded {
            method: method.to_string(),
        }
    })
}

fn missing(method: &str) -> InteropError {
    InteropError::MethodMissing {
        method: method.to_string(),
    }
}

/// A callable bound to an export of a [`NativeLibrary`] it borrows.
#[derive(Clone)]
pub struct Symbol<'lib, F> {
    callable: F,
    raw: libloading::Symbol<'lib, *mut c_void>,
}

impl<F> Deref for Symbol<'_, F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.callable
    }
}

impl<F> fmt::Debug for Symbol<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol").field("raw", &self.raw).finish()
    }
}
