// SPDX-License-Identifier: MIT OR Apache-2.0

//! This module is used to simplify importing the most common types of the
//! crate.
//!
//! This includes the naming wrapper, the registry module, `Status` codes,
//! etc.

pub use crate::proto::driver::component_name::{negotiate_language, ComponentName};
pub use crate::{CStr16, Handle, Identify, Result, ResultExt, Status, StatusExt};

#[cfg(feature = "alloc")]
pub use crate::proto::driver::name_table::{NameTable, NameTableBuilder};
#[cfg(feature = "alloc")]
pub use crate::registry;
