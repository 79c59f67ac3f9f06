// SPDX-License-Identifier: MIT OR Apache-2.0

//! Driver-side backing store for the naming interface.
//!
//! A driver module assembles a [`NameTable`] at load time, installs its
//! interface into the protocol database, and uninstalls it again before
//! unload. The table owns every buffer the interface hands out, so a
//! returned name stays valid for as long as the module stays loaded.

use crate::data_types::Handle;
use crate::registry::ProtocolDatabase;
use crate::{CStr16, CStr8, CString16, Result};
use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use component_name_raw::protocol::ComponentNameProtocol;
use component_name_raw::{Char16, Char8, Status};
use core::ffi::c_void;
use core::fmt::{self, Display, Formatter};
use core::ptr;

/// A three-letter ISO 639-2 code, stored as raw ASCII bytes.
type LanguageCode = [u8; 3];

/// Errors reported while assembling a [`NameTable`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameTableError {
    /// The supported-language list was empty.
    NoLanguages,
    /// A language code was not exactly three ASCII letters.
    InvalidLanguage,
    /// A name was given for a language outside the supported list.
    UnknownLanguage,
    /// A name contained a character not representable in UCS-2.
    InvalidName,
    /// A name was empty.
    EmptyName,
    /// Two names were given for the same entity and language.
    DuplicateName,
    /// A supported language has no driver name.
    MissingDriverName,
    /// A controller entry lacks a name in one of the supported languages.
    MissingControllerName,
}

impl Display for NameTableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NoLanguages => "no supported languages",
            Self::InvalidLanguage => "language code is not three ASCII letters",
            Self::UnknownLanguage => "language is not in the supported list",
            Self::InvalidName => "name is not representable in UCS-2",
            Self::EmptyName => "name is empty",
            Self::DuplicateName => "duplicate name for entity and language",
            Self::MissingDriverName => "driver name missing for a supported language",
            Self::MissingControllerName => "controller name missing for a supported language",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for NameTableError {}

/// One localized name.
#[derive(Debug)]
struct LocalName {
    language: LanguageCode,
    name: CString16,
}

/// Names for one managed controller, or for one child of a bus-style
/// controller. The child slot is a relation, not ownership: the table only
/// maps the pair to display text.
#[derive(Debug)]
struct ControllerEntry {
    controller: Handle,
    child: Option<Handle>,
    names: Vec<LocalName>,
}

/// Per-module object backing a registered naming interface.
///
/// The raw function-pointer table is the first field; the shims recover the
/// full table from the `this` pointer they receive. The struct must
/// therefore stay `repr(C)` with [`ComponentNameProtocol`] first.
///
/// Build one with [`NameTableBuilder`], then publish it with
/// [`install`](Self::install). The table does not own the controllers it
/// names; it only resolves (controller, child) pairs to display text.
#[repr(C)]
#[derive(Debug)]
pub struct NameTable {
    proto: ComponentNameProtocol,
    /// Concatenated three-letter codes plus null terminator;
    /// `proto.supported_languages` points into this buffer.
    languages: Vec<u8>,
    driver_names: Vec<LocalName>,
    controller_names: Vec<ControllerEntry>,
}

impl NameTable {
    /// Pointer to the raw interface, suitable for
    /// [`ProtocolDatabase::install_protocol_interface`].
    #[must_use]
    pub fn interface_ptr(&self) -> *mut c_void {
        ptr::from_ref(&self.proto).cast_mut().cast()
    }

    /// Install this table's interface into `db`, publishing it under the
    /// naming interface identifier. With `handle: None` a fresh module
    /// handle is minted and returned.
    ///
    /// # Safety
    ///
    /// The table must outlive the registration: callers must
    /// [`uninstall`](Self::uninstall) before dropping the table, or the
    /// database is left with a dangling interface pointer.
    pub unsafe fn install(
        &self,
        db: &mut ProtocolDatabase,
        handle: Option<Handle>,
    ) -> Result<Handle> {
        let handle =
            db.install_protocol_interface(handle, &ComponentNameProtocol::GUID, self.interface_ptr())?;
        log::debug!("component naming installed on {handle:?}");
        Ok(handle)
    }

    /// Remove this table's interface from `db`. Call before the module is
    /// unloaded (and before the table is dropped).
    pub fn uninstall(&self, db: &mut ProtocolDatabase, handle: Handle) -> Result {
        db.uninstall_protocol_interface(handle, &ComponentNameProtocol::GUID, self.interface_ptr())?;
        log::debug!("component naming uninstalled from {handle:?}");
        Ok(())
    }

    /// Check `language` against the supported list; exact three-byte match.
    fn match_language(&self, language: &CStr8) -> Option<LanguageCode> {
        let bytes = language.to_bytes();
        if bytes.len() != 3 {
            return None;
        }
        let code: LanguageCode = [bytes[0], bytes[1], bytes[2]];
        let list = &self.languages[..self.languages.len() - 1];
        list.chunks_exact(3).any(|c| c == code).then_some(code)
    }

    fn find_driver_name(&self, language: &CStr8) -> Option<&CStr16> {
        let code = self.match_language(language)?;
        self.driver_names
            .iter()
            .find(|n| n.language == code)
            .map(|n| n.name.as_ref())
    }

    fn find_controller_name(
        &self,
        controller: *mut c_void,
        child: Option<Handle>,
        language: &CStr8,
    ) -> Option<&CStr16> {
        let code = self.match_language(language)?;
        let entry = self
            .controller_names
            .iter()
            .find(|e| e.controller.as_ptr() == controller && e.child == child)?;
        entry
            .names
            .iter()
            .find(|n| n.language == code)
            .map(|n| n.name.as_ref())
    }
}

unsafe extern "efiapi" fn get_driver_name(
    this: *const ComponentNameProtocol,
    language: *const Char8,
    driver_name: *mut *const Char16,
) -> Status {
    if this.is_null() || language.is_null() || driver_name.is_null() {
        return Status::INVALID_PARAMETER;
    }
    // The protocol is the first field of the repr(C) table.
    let table = &*this.cast::<NameTable>();
    let language = CStr8::from_ptr(language.cast());
    match table.find_driver_name(language) {
        Some(name) => {
            driver_name.write(name.as_ptr().cast());
            Status::SUCCESS
        }
        None => Status::UNSUPPORTED,
    }
}

unsafe extern "efiapi" fn get_controller_name(
    this: *const ComponentNameProtocol,
    controller_handle: *mut c_void,
    child_handle: *mut c_void,
    language: *const Char8,
    controller_name: *mut *const Char16,
) -> Status {
    if this.is_null()
        || controller_handle.is_null()
        || language.is_null()
        || controller_name.is_null()
    {
        return Status::INVALID_PARAMETER;
    }
    let table = &*this.cast::<NameTable>();
    let language = CStr8::from_ptr(language.cast());
    let child = Handle::from_ptr(child_handle);
    match table.find_controller_name(controller_handle, child, language) {
        Some(name) => {
            controller_name.write(name.as_ptr().cast());
            Status::SUCCESS
        }
        None => Status::UNSUPPORTED,
    }
}

/// Builder for a [`NameTable`].
///
/// The builder enforces the contract's success guarantee up front: every
/// supported language must get a driver name, and every controller entry
/// must carry a name in every supported language. A query with a supported
/// language can then never fail.
#[derive(Debug)]
pub struct NameTableBuilder {
    languages: Vec<LanguageCode>,
    driver_names: Vec<LocalName>,
    controller_names: Vec<ControllerEntry>,
}

impl NameTableBuilder {
    /// Start a builder with the module's supported languages, in the
    /// module's own preference order.
    pub fn new(languages: &[&str]) -> core::result::Result<Self, NameTableError> {
        if languages.is_empty() {
            return Err(NameTableError::NoLanguages);
        }
        let mut codes = Vec::with_capacity(languages.len());
        for language in languages {
            codes.push(parse_language(language)?);
        }
        Ok(Self {
            languages: codes,
            driver_names: Vec::new(),
            controller_names: Vec::new(),
        })
    }

    /// Set the module's own name in `language`.
    pub fn driver_name(
        mut self,
        language: &str,
        name: &str,
    ) -> core::result::Result<Self, NameTableError> {
        let code = self.lookup_code(language)?;
        if self.driver_names.iter().any(|n| n.language == code) {
            return Err(NameTableError::DuplicateName);
        }
        let name = encode_name(name)?;
        self.driver_names.push(LocalName {
            language: code,
            name,
        });
        Ok(self)
    }

    /// Name a managed controller, or a child of it, in `language`.
    ///
    /// Pass `child: None` for the controller itself (device drivers, and bus
    /// drivers naming the bus controller); pass `Some` for a child managed
    /// below a bus-style controller.
    pub fn controller_name(
        mut self,
        controller: Handle,
        child: Option<Handle>,
        language: &str,
        name: &str,
    ) -> core::result::Result<Self, NameTableError> {
        let code = self.lookup_code(language)?;
        let name = encode_name(name)?;
        let local = LocalName {
            language: code,
            name,
        };
        match self
            .controller_names
            .iter_mut()
            .find(|e| e.controller == controller && e.child == child)
        {
            Some(entry) => {
                if entry.names.iter().any(|n| n.language == code) {
                    return Err(NameTableError::DuplicateName);
                }
                entry.names.push(local);
            }
            None => self.controller_names.push(ControllerEntry {
                controller,
                child,
                names: vec![local],
            }),
        }
        Ok(self)
    }

    /// Finish the table.
    ///
    /// Fails if any supported language is missing a driver name, or if a
    /// controller entry is incomplete for one of the supported languages.
    pub fn build(self) -> core::result::Result<Box<NameTable>, NameTableError> {
        for code in &self.languages {
            if !self.driver_names.iter().any(|n| n.language == *code) {
                return Err(NameTableError::MissingDriverName);
            }
            for entry in &self.controller_names {
                if !entry.names.iter().any(|n| n.language == *code) {
                    return Err(NameTableError::MissingControllerName);
                }
            }
        }

        let mut languages = Vec::with_capacity(self.languages.len() * 3 + 1);
        for code in &self.languages {
            languages.extend_from_slice(code);
        }
        languages.push(0);

        let mut table = Box::new(NameTable {
            proto: ComponentNameProtocol {
                get_driver_name,
                get_controller_name,
                supported_languages: ptr::null(),
            },
            languages,
            driver_names: self.driver_names,
            controller_names: self.controller_names,
        });
        // The language buffer lives on its own heap allocation, so this
        // pointer survives moves of the box itself.
        table.proto.supported_languages = table.languages.as_ptr();
        Ok(table)
    }

    fn lookup_code(&self, language: &str) -> core::result::Result<LanguageCode, NameTableError> {
        let code = parse_language(language)?;
        if self.languages.contains(&code) {
            Ok(code)
        } else {
            Err(NameTableError::UnknownLanguage)
        }
    }
}

fn parse_language(language: &str) -> core::result::Result<LanguageCode, NameTableError> {
    let bytes = language.as_bytes();
    if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
        return Err(NameTableError::InvalidLanguage);
    }
    Ok([bytes[0], bytes[1], bytes[2]])
}

fn encode_name(name: &str) -> core::result::Result<CString16, NameTableError> {
    let name = CString16::try_from(name).map_err(|_| NameTableError::InvalidName)?;
    if name.is_empty() {
        return Err(NameTableError::EmptyName);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::EqStrUntilNul;
    use crate::proto::driver::component_name::ComponentName;

    fn fake_handle(addr: usize) -> Handle {
        // Synthetic address; handles are opaque tokens and the table never
        // dereferences them.
        unsafe { Handle::from_ptr(addr as *mut c_void) }.unwrap()
    }

    fn sample_table() -> Box<NameTable> {
        NameTableBuilder::new(&["eng", "fra"])
            .unwrap()
            .driver_name("eng", "Sample disk driver")
            .unwrap()
            .driver_name("fra", "Pilote de disque exemple")
            .unwrap()
            .controller_name(fake_handle(0x1000), None, "eng", "Primary disk controller")
            .unwrap()
            .controller_name(fake_handle(0x1000), None, "fra", "Controleur de disque principal")
            .unwrap()
            .controller_name(fake_handle(0x1000), Some(fake_handle(0x2000)), "eng", "Disk volume 0")
            .unwrap()
            .controller_name(fake_handle(0x1000), Some(fake_handle(0x2000)), "fra", "Volume de disque 0")
            .unwrap()
            .build()
            .unwrap()
    }

    /// View a table the way a caller would, through the safe wrapper.
    fn as_component_name(table: &NameTable) -> &ComponentName {
        unsafe { &*table.interface_ptr().cast::<ComponentName>() }
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            NameTableBuilder::new(&[]).unwrap_err(),
            NameTableError::NoLanguages
        );
        assert_eq!(
            NameTableBuilder::new(&["en"]).unwrap_err(),
            NameTableError::InvalidLanguage
        );
        assert_eq!(
            NameTableBuilder::new(&["e1g"]).unwrap_err(),
            NameTableError::InvalidLanguage
        );

        let builder = NameTableBuilder::new(&["eng"]).unwrap();
        assert_eq!(
            builder.driver_name("fra", "Nom").unwrap_err(),
            NameTableError::UnknownLanguage
        );

        let builder = NameTableBuilder::new(&["eng"]).unwrap();
        assert_eq!(
            builder.driver_name("eng", "").unwrap_err(),
            NameTableError::EmptyName
        );

        let builder = NameTableBuilder::new(&["eng"])
            .unwrap()
            .driver_name("eng", "Driver")
            .unwrap();
        assert_eq!(
            builder.driver_name("eng", "Driver again").unwrap_err(),
            NameTableError::DuplicateName
        );

        // Every supported language needs a driver name.
        let builder = NameTableBuilder::new(&["eng", "fra"])
            .unwrap()
            .driver_name("eng", "Driver")
            .unwrap();
        assert_eq!(builder.build().unwrap_err(), NameTableError::MissingDriverName);

        // Controller entries must be complete, too.
        let builder = NameTableBuilder::new(&["eng", "fra"])
            .unwrap()
            .driver_name("eng", "Driver")
            .unwrap()
            .driver_name("fra", "Pilote")
            .unwrap()
            .controller_name(fake_handle(0x1000), None, "eng", "Controller")
            .unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            NameTableError::MissingControllerName
        );
    }

    #[test]
    fn test_driver_name_queries() {
        let table = sample_table();
        let naming = as_component_name(&table);

        let name = naming.driver_name("eng").unwrap();
        assert!(!name.is_empty());
        assert!(name.eq_str_until_nul("Sample disk driver"));

        let name = naming.driver_name("fra").unwrap();
        assert!(name.eq_str_until_nul("Pilote de disque exemple"));

        // A language outside the supported list is refused, never answered
        // with an empty string.
        assert_eq!(
            naming.driver_name("deu").unwrap_err().status(),
            Status::UNSUPPORTED
        );
        // Malformed tags fall out the same way: they can never be in the list.
        assert_eq!(
            naming.driver_name("en").unwrap_err().status(),
            Status::UNSUPPORTED
        );
    }

    #[test]
    fn test_driver_name_idempotent() {
        let table = sample_table();
        let naming = as_component_name(&table);

        let first = naming.driver_name("eng").unwrap();
        let second = naming.driver_name("eng").unwrap();
        // Content must match; buffer identity is not part of the contract.
        assert_eq!(first, second);
    }

    #[test]
    fn test_controller_name_queries() {
        let table = sample_table();
        let naming = as_component_name(&table);
        let controller = fake_handle(0x1000);
        let child = fake_handle(0x2000);

        let name = naming.controller_name(controller, None, "eng").unwrap();
        assert!(name.eq_str_until_nul("Primary disk controller"));

        let name = naming
            .controller_name(controller, Some(child), "eng")
            .unwrap();
        assert!(name.eq_str_until_nul("Disk volume 0"));

        // A pair this module does not manage.
        assert_eq!(
            naming
                .controller_name(fake_handle(0x3000), None, "eng")
                .unwrap_err()
                .status(),
            Status::UNSUPPORTED
        );
        assert_eq!(
            naming
                .controller_name(controller, Some(fake_handle(0x4000)), "eng")
                .unwrap_err()
                .status(),
            Status::UNSUPPORTED
        );

        // Supported controller, unsupported language.
        assert_eq!(
            naming
                .controller_name(controller, None, "deu")
                .unwrap_err()
                .status(),
            Status::UNSUPPORTED
        );
    }

    #[test]
    fn test_null_arguments_at_the_abi() {
        let table = sample_table();
        let proto = unsafe { &*table.interface_ptr().cast::<ComponentNameProtocol>() };
        let mut out: *const Char16 = ptr::null();

        // Null language.
        let status = unsafe { (proto.get_driver_name)(proto, ptr::null(), &mut out) };
        assert_eq!(status, Status::INVALID_PARAMETER);

        // Null output slot.
        let status =
            unsafe { (proto.get_driver_name)(proto, c"eng".as_ptr().cast(), ptr::null_mut()) };
        assert_eq!(status, Status::INVALID_PARAMETER);

        // Null controller handle.
        let status = unsafe {
            (proto.get_controller_name)(
                proto,
                ptr::null_mut(),
                ptr::null_mut(),
                c"eng".as_ptr().cast(),
                &mut out,
            )
        };
        assert_eq!(status, Status::INVALID_PARAMETER);

        // The valid path still works through the raw table.
        let status =
            unsafe { (proto.get_driver_name)(proto, c"eng".as_ptr().cast(), &mut out) };
        assert_eq!(status, Status::SUCCESS);
        assert!(!out.is_null());
        let name = unsafe { CStr16::from_ptr(out.cast()) };
        assert!(name.eq_str_until_nul("Sample disk driver"));
    }

    #[test]
    fn test_supported_languages_order() {
        let table = sample_table();
        let naming = as_component_name(&table);
        let languages: alloc::vec::Vec<_> = naming.supported_languages().unwrap().collect();
        // The list keeps the driver's declared preference order.
        assert_eq!(languages, ["eng", "fra"]);
    }
}
