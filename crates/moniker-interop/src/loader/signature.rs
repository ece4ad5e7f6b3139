//! Binding raw symbol addresses to typed function pointers.

#![allow(unsafe_code)]

use std::ffi::c_void;
use std::mem;
use std::ptr::NonNull;

/// A function-pointer type a native export can be bound to.
///
/// Implemented for `unsafe extern "C" fn` and `unsafe extern "system" fn`
/// pointers of up to six arguments. On 32-bit Windows the latter is
/// `stdcall`, the convention most Win32-style exports use.
///
/// # Safety
///
/// Implementors must be pointer-sized and valid to construct from any code
/// address. `from_address` may only return `Some` when the conversion keeps
/// the address intact.
pub unsafe trait NativeSignature: Copy + Sized {
    /// Reinterpret `address` as this signature, or `None` if it cannot be
    /// represented.
    ///
    /// # Safety
    ///
    /// `address` must point to a function whose ABI and parameter types
    /// match `Self`. Calling through a mismatched signature is undefined
    /// behavior.
    unsafe fn from_address(address: NonNull<c_void>) -> Option<Self>;
}

/// Reinterpret a code address as a pointer-sized function pointer.
///
/// # Safety
///
/// See [`NativeSignature::from_address`].
unsafe fn bind_address<F: Copy>(address: NonNull<c_void>) -> Option<F> {
    if mem::size_of::<F>() != mem::size_of::<*mut c_void>() {
        return None;
    }

    let raw = address.as_ptr();
    // SAFETY: sizes were checked above and the caller guarantees `F` is a
    // function-pointer type matching the export at `raw`.
    Some(unsafe { mem::transmute_copy::<*mut c_void, F>(&raw) })
}

macro_rules! impl_native_signature {
    (@abi $abi:tt; $($arg:ident),*) => {
        // SAFETY: function pointers are pointer-sized and any non-null code
        // address is a valid bit pattern for them.
        unsafe impl<Ret, $($arg),*> NativeSignature for unsafe extern $abi fn($($arg),*) -> Ret {
            unsafe fn from_address(address: NonNull<c_void>) -> Option<Self> {
                // SAFETY: forwarded from the caller's contract.
                unsafe { bind_address(address) }
            }
        }
    };
    ($($arg:ident),*) => {
        impl_native_signature!(@abi "C"; $($arg),*);
        impl_native_signature!(@abi "system"; $($arg),*);
    };
}

impl_native_signature!();
impl_native_signature!(A);
impl_native_signature!(A, B);
impl_native_signature!(A, B, C);
impl_native_signature!(A, B, C, D);
impl_native_signature!(A, B, C, D, E);
impl_native_signature!(A, B, C, D, E, F);
