// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw interface for the boot-environment component naming contract.
//!
//! This crate is intended for implementing the naming side of a driver
//! module. It is also used for implementing the [`component-name`] crate,
//! which provides a safe wrapper around the raw function-pointer table.
//!
//! For querying names from a caller's point of view, consider using the
//! [`component-name`] crate instead of `component-name-raw`.
//!
//! [`component-name`]: ../component_name/index.html

#![no_std]
#![deny(
    clippy::all,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::ptr_as_ptr,
    clippy::use_self
)]
#![warn(missing_debug_implementations, missing_docs, unused)]

#[macro_use]
mod enums;

pub mod protocol;

mod status;

pub use status::Status;
pub use uguid::{guid, Guid};

use core::ffi::c_void;

/// Handle to a boot-environment entity (driver module, controller, child
/// device).
pub type Handle = *mut c_void;

/// One-byte character.
///
/// Most strings in the naming contract use [`Char16`], but language tags
/// use one-byte characters. Unless otherwise noted, these are encoded as
/// 8-bit ASCII using the ISO-Latin-1 character set.
pub type Char8 = u8;

/// Two-byte character.
///
/// Unless otherwise noted, the encoding is UCS-2. The UCS-2 encoding was
/// defined by Unicode 2.1 and ISO/IEC 10646 standards, but is no longer part
/// of the modern Unicode standards. It is essentially UTF-16 without support
/// for surrogate pairs.
pub type Char16 = u16;
