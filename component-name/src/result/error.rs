// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Status;
use core::fmt::{Debug, Display, Formatter};

/// An error status, together with optional additional data describing what
/// went wrong.
///
/// Naming failures are never fatal: a caller that receives an `Error` is
/// expected to treat the missing name as optional cosmetic data and carry
/// on.
#[derive(Debug, Eq, PartialEq)]
pub struct Error<Data: Debug = ()> {
    status: Status,
    data: Data,
}

impl<Data: Debug> Error<Data> {
    /// Create an `Error`.
    #[must_use]
    pub const fn new(status: Status, data: Data) -> Self {
        Self { status, data }
    }

    /// Get the error's [`Status`].
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Get the error's additional data.
    #[must_use]
    pub const fn data(&self) -> &Data {
        &self.data
    }

    /// Split this error into its inner status and data.
    #[must_use]
    pub fn split(self) -> (Status, Data) {
        (self.status, self.data)
    }
}

impl From<Status> for Error<()> {
    fn from(status: Status) -> Self {
        Self::new(status, ())
    }
}

impl<Data: Debug> Display for Error<Data> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Error {}: {:?}", self.status(), self.data())
    }
}

impl<Data: Debug> core::error::Error for Error<Data> {}
