// SPDX-License-Identifier: MIT OR Apache-2.0

pub use uguid::Guid;

/// Several entities in the boot environment are referred to by their GUID;
/// this trait is the building block used to interface them here.
///
/// You should never need to use the `Identify` trait directly, but instead
/// go for more specific traits such as [`Protocol`], which indicate in which
/// circumstances an `Identify`-tagged type should be used.
///
/// # Safety
///
/// Implementing `Identify` is unsafe because attaching an incorrect GUID to
/// a type can lead to type unsafety on both sides of a registry lookup.
///
/// [`Protocol`]: crate::proto::Protocol
pub unsafe trait Identify {
    /// Unique protocol identifier.
    const GUID: Guid;
}
