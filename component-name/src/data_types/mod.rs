// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data type definitions
//!
//! This module defines the basic data types that are used throughout the
//! crate: handles, characters and strings in the encodings the naming
//! contract mandates, and the [`Identify`] trait for identifier-keyed
//! lookup.

use core::ffi::c_void;
use core::ptr::{self, NonNull};

/// Opaque handle to a boot-environment entity (driver module, controller,
/// child device), guaranteed to be non-null.
///
/// If you need to have a nullable handle (for example the child slot of a
/// controller name query) use `Option<Handle>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Handle(NonNull<c_void>);

impl Handle {
    /// Creates a new [`Handle`] from a raw address.
    ///
    /// Returns `None` if `ptr` is null.
    ///
    /// # Safety
    ///
    /// This function is unsafe because the caller must be sure that the
    /// address really designates the entity it will be used as. Handles are
    /// opaque tokens and are never dereferenced by this crate, but handing a
    /// wrong handle to a driver module makes its answers meaningless.
    pub unsafe fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// Get the underlying raw pointer.
    #[must_use]
    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }

    pub(crate) fn opt_to_ptr(handle: Option<Self>) -> *mut c_void {
        handle.map(|h| h.0.as_ptr()).unwrap_or(ptr::null_mut())
    }
}

mod guid;
pub use self::guid::{Guid, Identify};

pub mod chars;
pub use self::chars::{Char16, Char8};

mod strs;
pub use self::strs::{
    CStr16, CStr8, EqStrUntilNul, FromSliceWithNulError, FromStrWithBufError,
};

#[cfg(feature = "alloc")]
mod owned_strs;
#[cfg(feature = "alloc")]
pub use self::owned_strs::{CString16, FromStrError};
