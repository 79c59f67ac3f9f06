// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{guid, Char16, Char8, Guid, Handle, Status};

/// Function-pointer table a driver module publishes to expose
/// human-readable names for itself and for the controllers it manages.
///
/// The table and every buffer it hands out are owned by the publishing
/// module and stay valid for as long as the module is loaded. Some boot
/// managers ship the same layout under a project-local renamed spelling;
/// the identifier below is the one both spellings register under.
#[derive(Debug)]
#[repr(C)]
pub struct ComponentNameProtocol {
    /// Retrieves the name of the driver module itself, in the requested
    /// language.
    ///
    /// Returns [`Status::INVALID_PARAMETER`] if `this`, `language`, or
    /// `driver_name` is null, and [`Status::UNSUPPORTED`] if `language` is
    /// not in [`supported_languages`](Self::supported_languages).
    pub get_driver_name: unsafe extern "efiapi" fn(
        this: *const Self,
        language: *const Char8,
        driver_name: *mut *const Char16,
    ) -> Status,

    /// Retrieves the name of a controller managed by this module, from
    /// this module's point of view.
    ///
    /// `child_handle` may be null; when non-null it selects a child of
    /// `controller_handle`. Returns [`Status::UNSUPPORTED`] if the module
    /// is not currently managing the given controller/child pair, or if
    /// `language` is not supported.
    pub get_controller_name: unsafe extern "efiapi" fn(
        this: *const Self,
        controller_handle: Handle,
        child_handle: Handle,
        language: *const Char8,
        controller_name: *mut *const Char16,
    ) -> Status,

    /// Null-terminated sequence of concatenated three-letter ISO 639-2
    /// language codes, in the driver's own preference order. Fixed for the
    /// lifetime of the module; callers must treat it as read-only.
    pub supported_languages: *const Char8,
}

impl ComponentNameProtocol {
    /// Identifier the naming interface registers under.
    pub const GUID: Guid = guid!("107a772c-d5e1-11d4-9a46-0090273fc14d");
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem;

    /// The table crosses module boundaries, so its layout is part of the
    /// contract: two function pointers followed by the language pointer.
    #[test]
    fn test_protocol_abi() {
        assert_eq!(
            mem::size_of::<ComponentNameProtocol>(),
            3 * mem::size_of::<usize>()
        );
        assert_eq!(
            mem::align_of::<ComponentNameProtocol>(),
            mem::align_of::<usize>()
        );
    }

    #[test]
    fn test_protocol_guid() {
        assert_eq!(
            ComponentNameProtocol::GUID,
            guid!("107a772c-d5e1-11d4-9a46-0090273fc14d")
        );
    }
}
