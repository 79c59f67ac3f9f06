// SPDX-License-Identifier: MIT OR Apache-2.0

//! Safe wrappers for the boot-environment component naming contract.
//!
//! # Crate organisation
//!
//! The top-level module contains some of the most used types, such as the
//! result and error types, or other common data structures such as GUIDs,
//! handles and the UCS-2 string types names are expressed in.
//!
//! ## Protocols and the registry
//!
//! The `proto` module contains the naming interface itself: the caller-side
//! [`ComponentName`] wrapper with the language negotiation helpers, and the
//! driver-side [`NameTable`] that backs a registered instance.
//!
//! The `registry` module contains the identifier registry ("protocol
//! database") through which a caller obtains a naming instance for a module
//! of interest without either party depending on the other's concrete type.
//!
//! ## Optional crate features
//!
//! - `alloc` (enabled by default): Enable functionality requiring the
//!   [`alloc`] crate from the Rust standard library: the owned string type
//!   [`CString16`], the driver-side [`NameTable`], and the [`registry`]
//!   module. Disable it for a pure caller-side build without an allocator.
//!
//! ## Adapting to local conditions
//!
//! Publishing the naming interface is optional for a driver module. A
//! module of interest may therefore not expose it at all; callers are
//! expected to treat missing names as optional cosmetic data and must never
//! let a naming failure abort device enumeration or boot.
//!
//! [`ComponentName`]: proto::driver::component_name::ComponentName
//! [`NameTable`]: proto::driver::name_table::NameTable

#![no_std]
#![warn(clippy::ptr_as_ptr, missing_docs, unused)]
#![deny(clippy::all)]
#![deny(clippy::must_use_candidate)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod data_types;
#[cfg(feature = "alloc")]
pub use self::data_types::CString16;
pub use self::data_types::{CStr16, CStr8, Char16, Char8, Guid, Handle, Identify};

mod result;
pub use self::result::{Error, Result, ResultExt, Status, StatusExt};

pub mod proto;

#[cfg(feature = "alloc")]
pub mod registry;

pub mod prelude;

pub use component_name_raw::guid;
