// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifier registry ("protocol database").
//!
//! The registry lets a caller obtain an interface instance for a module of
//! interest by (handle, identifier), without either party depending on the
//! other's concrete type. A lookup either yields a valid instance or a
//! not-found condition; the registry never returns partial or stale
//! instances.
//!
//! Interfaces are installed at module load time and uninstalled before
//! module unload. Besides the freestanding [`ProtocolDatabase`], this
//! module provides the process-wide instance with an explicit lifecycle:
//! [`init`] on environment start, [`teardown`] at the end, and
//! [`with_database`] for access in between. All access to the process-wide
//! instance goes through these functions.

use crate::data_types::Handle;
use crate::proto::ProtocolPointer;
use crate::{Guid, Result, Status};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ffi::c_void;
use core::ptr::{self, NonNull};
use core::sync::atomic::{AtomicPtr, Ordering};
use log::{debug, trace};

struct ProtocolEntry {
    guid: Guid,
    interface: *mut c_void,
}

struct HandleEntry {
    handle: Handle,
    protocols: Vec<ProtocolEntry>,
}

/// Table associating (handle, interface identifier) pairs with installed
/// interface instances.
///
/// Handles come into existence when the first interface is installed on
/// them and cease to exist when the last one is uninstalled. The database
/// stores type-erased interface pointers; it does not own the interfaces.
pub struct ProtocolDatabase {
    entries: Vec<HandleEntry>,
    next_handle: usize,
}

impl ProtocolDatabase {
    /// Creates an empty database.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 1,
        }
    }

    /// Installs a protocol interface on a handle.
    ///
    /// If `handle` is `None`, a new handle is minted and returned.
    ///
    /// # Errors
    ///
    /// * [`Status::INVALID_PARAMETER`]: this protocol is already installed
    ///   on the handle.
    pub fn install_protocol_interface(
        &mut self,
        handle: Option<Handle>,
        protocol: &Guid,
        interface: *mut c_void,
    ) -> Result<Handle> {
        let handle = match handle {
            Some(handle) => handle,
            None => self.mint_handle(),
        };
        let index = match self.entries.iter().position(|e| e.handle == handle) {
            Some(index) => index,
            None => {
                self.entries.push(HandleEntry {
                    handle,
                    protocols: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[index];
        if entry.protocols.iter().any(|p| p.guid == *protocol) {
            return Err(Status::INVALID_PARAMETER.into());
        }
        entry.protocols.push(ProtocolEntry {
            guid: *protocol,
            interface,
        });
        trace!("installed {protocol} on {handle:?}");
        Ok(handle)
    }

    /// Removes a protocol interface from a handle. The interface pointer
    /// must match the installed one. When the last interface is removed the
    /// handle ceases to exist.
    ///
    /// # Errors
    ///
    /// * [`Status::NOT_FOUND`]: the interface was not found on the handle.
    pub fn uninstall_protocol_interface(
        &mut self,
        handle: Handle,
        protocol: &Guid,
        interface: *mut c_void,
    ) -> Result {
        let Some(index) = self.entries.iter().position(|e| e.handle == handle) else {
            return Err(Status::NOT_FOUND.into());
        };
        let entry = &mut self.entries[index];
        let Some(proto_index) = entry
            .protocols
            .iter()
            .position(|p| p.guid == *protocol && p.interface == interface)
        else {
            return Err(Status::NOT_FOUND.into());
        };
        entry.protocols.remove(proto_index);
        if entry.protocols.is_empty() {
            self.entries.remove(index);
        }
        trace!("uninstalled {protocol} from {handle:?}");
        Ok(())
    }

    /// Checks whether `handle` supports `protocol`, without producing an
    /// instance.
    ///
    /// # Errors
    ///
    /// * [`Status::INVALID_PARAMETER`]: `handle` is not a handle this
    ///   database knows at all.
    /// * [`Status::UNSUPPORTED`]: the handle does not support the protocol.
    pub fn test_protocol(&self, handle: Handle, protocol: &Guid) -> Result {
        self.find(handle, protocol).map(|_| ())
    }

    /// Opens the `P` instance installed on `handle`.
    ///
    /// The returned reference borrows the database, so it stays valid for
    /// the immediate call sequence; the instance itself remains owned by
    /// the module that installed it.
    ///
    /// # Safety
    ///
    /// The caller must ensure the interface installed under `P::GUID`
    /// really is a `P`. Installation is the trust boundary: whoever
    /// installed the interface vouched for that pairing.
    ///
    /// # Errors
    ///
    /// * [`Status::INVALID_PARAMETER`]: `handle` is not a handle this
    ///   database knows at all.
    /// * [`Status::UNSUPPORTED`]: the handle does not support `P`.
    pub unsafe fn open_protocol<P: ProtocolPointer>(&self, handle: Handle) -> Result<&P> {
        let interface = self.find(handle, &P::GUID)?;
        Ok(&*P::ptr_from_ffi(interface))
    }

    /// Returns the handles that currently support `protocol`.
    #[must_use]
    pub fn locate_handles(&self, protocol: &Guid) -> Vec<Handle> {
        self.entries
            .iter()
            .filter(|e| e.protocols.iter().any(|p| p.guid == *protocol))
            .map(|e| e.handle)
            .collect()
    }

    fn find(&self, handle: Handle, protocol: &Guid) -> Result<*mut c_void> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.handle == handle)
            .ok_or_else(|| crate::Error::from(Status::INVALID_PARAMETER))?;
        entry
            .protocols
            .iter()
            .find(|p| p.guid == *protocol)
            .map(|p| p.interface)
            .ok_or_else(|| Status::UNSUPPORTED.into())
    }

    fn mint_handle(&mut self) -> Handle {
        let address = self.next_handle;
        self.next_handle += 1;
        // Synthetic non-null address; handles are opaque tokens and never
        // dereferenced.
        unsafe { Handle::from_ptr(address as *mut c_void) }
            .expect("handle addresses start at 1")
    }
}

impl Default for ProtocolDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide database. Null before [`init`] and after [`teardown`];
/// also null while [`with_database`] has the database detached.
static DATABASE: AtomicPtr<ProtocolDatabase> = AtomicPtr::new(ptr::null_mut());

/// Creates the process-wide database. Call once when the environment comes
/// up, before any module registers an interface.
///
/// # Errors
///
/// * [`Status::ALREADY_STARTED`]: [`init`] was already called.
pub fn init() -> Result {
    let database = Box::into_raw(Box::new(ProtocolDatabase::new()));
    match DATABASE.compare_exchange(
        ptr::null_mut(),
        database,
        Ordering::AcqRel,
        Ordering::Acquire,
    ) {
        Ok(_) => {
            debug!("protocol database initialized");
            Ok(())
        }
        Err(_) => {
            // Lost the race (or init was called twice); discard our copy.
            drop(unsafe { Box::from_raw(database) });
            Err(Status::ALREADY_STARTED.into())
        }
    }
}

/// Destroys the process-wide database. Every module must have uninstalled
/// its interfaces by this point; whatever is left in the table is dropped
/// as dangling metadata (the interfaces themselves are owned by their
/// modules).
///
/// # Errors
///
/// * [`Status::NOT_STARTED`]: [`init`] has not been called.
pub fn teardown() -> Result {
    let database = DATABASE.swap(ptr::null_mut(), Ordering::AcqRel);
    if database.is_null() {
        return Err(Status::NOT_STARTED.into());
    }
    drop(unsafe { Box::from_raw(database) });
    debug!("protocol database torn down");
    Ok(())
}

/// Runs `f` with exclusive access to the process-wide database.
///
/// The database is detached for the duration of the call, so a re-entrant
/// call from within `f` (or a call before [`init`] / after [`teardown`])
/// fails with [`Status::NOT_STARTED`] instead of aliasing the table.
pub fn with_database<R>(f: impl FnOnce(&mut ProtocolDatabase) -> R) -> Result<R> {
    let database = DATABASE.swap(ptr::null_mut(), Ordering::AcqRel);
    let Some(mut database) = NonNull::new(database) else {
        return Err(Status::NOT_STARTED.into());
    };
    let result = f(unsafe { database.as_mut() });
    DATABASE.store(database.as_ptr(), Ordering::Release);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use component_name_raw::guid;

    const TEST_GUID: Guid = guid!("12345678-9abc-def0-1234-56789abcdef0");

    fn fake_interface(addr: usize) -> *mut c_void {
        addr as *mut c_void
    }

    #[test]
    fn test_install_and_open() {
        let mut db = ProtocolDatabase::new();
        let handle = db
            .install_protocol_interface(None, &TEST_GUID, fake_interface(0x100))
            .unwrap();

        db.test_protocol(handle, &TEST_GUID).unwrap();
        assert_eq!(db.locate_handles(&TEST_GUID), [handle]);

        // Installing the same protocol on the same handle is refused.
        assert_eq!(
            db.install_protocol_interface(Some(handle), &TEST_GUID, fake_interface(0x200))
                .unwrap_err()
                .status(),
            Status::INVALID_PARAMETER
        );
    }

    #[test]
    fn test_minted_handles_are_distinct() {
        let mut db = ProtocolDatabase::new();
        let a = db
            .install_protocol_interface(None, &TEST_GUID, fake_interface(0x100))
            .unwrap();
        let b = db
            .install_protocol_interface(None, &TEST_GUID, fake_interface(0x200))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(db.locate_handles(&TEST_GUID).len(), 2);
    }

    #[test]
    fn test_lookup_errors() {
        let mut db = ProtocolDatabase::new();
        let handle = db
            .install_protocol_interface(None, &TEST_GUID, fake_interface(0x100))
            .unwrap();

        // Known handle, unknown protocol.
        let other = guid!("107a772c-0000-11d4-9a46-0090273fc14d");
        assert_eq!(
            db.test_protocol(handle, &other).unwrap_err().status(),
            Status::UNSUPPORTED
        );

        // Handle the database has never seen.
        let stranger = unsafe { Handle::from_ptr(0xdead0 as *mut c_void) }.unwrap();
        assert_eq!(
            db.test_protocol(stranger, &TEST_GUID).unwrap_err().status(),
            Status::INVALID_PARAMETER
        );
    }

    #[test]
    fn test_uninstall() {
        let mut db = ProtocolDatabase::new();
        let handle = db
            .install_protocol_interface(None, &TEST_GUID, fake_interface(0x100))
            .unwrap();

        // Wrong interface pointer does not uninstall.
        assert_eq!(
            db.uninstall_protocol_interface(handle, &TEST_GUID, fake_interface(0x200))
                .unwrap_err()
                .status(),
            Status::NOT_FOUND
        );

        db.uninstall_protocol_interface(handle, &TEST_GUID, fake_interface(0x100))
            .unwrap();

        // The handle ceased to exist with its last protocol.
        assert_eq!(
            db.test_protocol(handle, &TEST_GUID).unwrap_err().status(),
            Status::INVALID_PARAMETER
        );
        assert_eq!(
            db.uninstall_protocol_interface(handle, &TEST_GUID, fake_interface(0x100))
                .unwrap_err()
                .status(),
            Status::NOT_FOUND
        );
    }

    /// The process-wide lifecycle lives in a single test: the global
    /// database is one per process, and tests run concurrently.
    #[test]
    fn test_global_lifecycle() {
        assert_eq!(
            with_database(|_| ()).unwrap_err().status(),
            Status::NOT_STARTED
        );

        init().unwrap();
        assert_eq!(init().unwrap_err().status(), Status::ALREADY_STARTED);

        let handle = with_database(|db| {
            db.install_protocol_interface(None, &TEST_GUID, fake_interface(0x100))
        })
        .unwrap()
        .unwrap();

        with_database(|db| db.test_protocol(handle, &TEST_GUID))
            .unwrap()
            .unwrap();

        // Re-entrant access sees the database as detached.
        with_database(|_| {
            assert_eq!(
                with_database(|_| ()).unwrap_err().status(),
                Status::NOT_STARTED
            );
        })
        .unwrap();

        teardown().unwrap();
        assert_eq!(teardown().unwrap_err().status(), Status::NOT_STARTED);
    }
}
