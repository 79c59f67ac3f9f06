// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol definitions.
//!
//! Protocols are sets of related functionality identified by a unique
//! ID. They are published by driver modules and looked up by callers
//! through the identifier registry.

mod component_name;

pub use component_name::ComponentNameProtocol;
