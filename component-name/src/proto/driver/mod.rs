// SPDX-License-Identifier: MIT OR Apache-2.0

//! Driver-model protocols.
//!
//! [`component_name`] is the caller-side view of a module's naming
//! interface; [`name_table`] is the driver-side backing store a module
//! registers at load time.

pub mod component_name;

#[cfg(feature = "alloc")]
pub mod name_table;
