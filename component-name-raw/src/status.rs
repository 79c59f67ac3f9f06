// SPDX-License-Identifier: MIT OR Apache-2.0

use core::fmt::Debug;

newtype_enum! {
/// Status codes reported by naming operations and registry lookups.
///
/// The vocabulary is shared between independently compiled modules, so the
/// `Status` constants are not a comprehensive list of all possible values.
#[must_use]
pub enum Status: usize => {
    /// The operation completed successfully.
    SUCCESS                 =  0,

    /// The string contained characters that could not be rendered and were skipped.
    WARN_UNKNOWN_GLYPH      =  1,
    /// The resulting buffer was too small, and the data was truncated.
    WARN_BUFFER_TOO_SMALL   =  4,

    /// The module failed to load.
    LOAD_ERROR              = Self::ERROR_BIT |  1,
    /// A parameter was incorrect.
    INVALID_PARAMETER       = Self::ERROR_BIT |  2,
    /// The operation is not supported.
    UNSUPPORTED             = Self::ERROR_BIT |  3,
    /// The buffer was not the proper size for the request.
    BAD_BUFFER_SIZE         = Self::ERROR_BIT |  4,
    /// The buffer is not large enough to hold the requested data.
    BUFFER_TOO_SMALL        = Self::ERROR_BIT |  5,
    /// There is no data pending upon return.
    NOT_READY               = Self::ERROR_BIT |  6,
    /// The physical device reported an error while attempting the operation.
    DEVICE_ERROR            = Self::ERROR_BIT |  7,
    /// A resource has run out.
    OUT_OF_RESOURCES        = Self::ERROR_BIT |  9,
    /// The item was not found.
    NOT_FOUND               = Self::ERROR_BIT | 14,
    /// Access was denied.
    ACCESS_DENIED           = Self::ERROR_BIT | 15,
    /// The service has not been started.
    NOT_STARTED             = Self::ERROR_BIT | 19,
    /// The service has already been started.
    ALREADY_STARTED         = Self::ERROR_BIT | 20,
    /// The operation was aborted.
    ABORTED                 = Self::ERROR_BIT | 21,
    /// The language specified was invalid.
    INVALID_LANGUAGE        = Self::ERROR_BIT | 32,
}}

impl Status {
    /// Bit indicating that a status code is an error.
    pub const ERROR_BIT: usize = 1 << (core::mem::size_of::<usize>() * 8 - 1);

    /// Returns true if status code indicates success.
    #[inline]
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Returns true if status code indicates a warning.
    #[inline]
    #[must_use]
    pub fn is_warning(self) -> bool {
        (self != Self::SUCCESS) && (self.0 & Self::ERROR_BIT == 0)
    }

    /// Returns true if the status code indicates an error.
    #[inline]
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.0 & Self::ERROR_BIT != 0
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}
