// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-side access to a driver module's naming interface, and the
//! language negotiation used to pick a mutually understood language.

use crate::data_types::{Guid, Handle};
use crate::proto::Protocol;
use crate::{CStr16, Error, Identify, Result, Status, StatusExt};
use component_name_raw::protocol::ComponentNameProtocol;
use core::{ptr, slice};

/// Protocol that provides human-readable names for a driver module and for
/// each of the controllers the module is managing.
///
/// An instance is owned by the module that registered it and stays valid
/// for as long as the module is loaded. The same physical controller may be
/// named differently by different modules that each manage it from a
/// different abstraction layer (e.g. a bus driver vs. a device driver);
/// query the specific module whose viewpoint you need.
///
/// The corresponding C type is the component name function-pointer table
/// (`EFI_COMPONENT_NAME_PROTOCOL`; some boot managers carry the same layout
/// under a project-local renamed spelling, registered under the same
/// identifier).
#[repr(transparent)]
pub struct ComponentName(ComponentNameProtocol);

unsafe impl Identify for ComponentName {
    const GUID: Guid = ComponentNameProtocol::GUID;
}

impl Protocol for ComponentName {}

impl ComponentName {
    /// Get an iterator over supported languages. Each language is identified
    /// by a three-letter ASCII string specified in [ISO 639-2]. For example,
    /// English is encoded as "eng".
    ///
    /// The order of the list is the driver's own preference order.
    ///
    /// [ISO 639-2]: https://en.wikipedia.org/wiki/List_of_ISO_639-2_codes
    pub fn supported_languages(&self) -> core::result::Result<LanguageIter, LanguageError> {
        LanguageIter::new(self.0.supported_languages)
    }

    /// Get the human-readable name of the driver module in the given
    /// language.
    ///
    /// `language` must be one of the languages returned by
    /// [`supported_languages`]; anything else yields
    /// [`Status::UNSUPPORTED`]. The operation is idempotent: repeated calls
    /// with the same language return text with identical content.
    ///
    /// The returned string is borrowed from the driver module. It stays
    /// valid until the next call into the same module's naming interface, or
    /// until the module is unloaded; copy it out if you need it longer.
    ///
    /// [`supported_languages`]: Self::supported_languages
    pub fn driver_name(&self, language: &str) -> Result<&CStr16> {
        let language = language_to_cstr(language)?;
        let mut driver_name = ptr::null();
        unsafe { (self.0.get_driver_name)(&self.0, language.as_ptr(), &mut driver_name) }
            .to_result_with_val(|| unsafe { CStr16::from_ptr(driver_name.cast()) })
    }

    /// Get the human-readable name of a controller in the given language,
    /// from this module's point of view.
    ///
    /// `child_handle` selects a child of `controller_handle` when supplied;
    /// leave it `None` to name the controller itself. If the module is not
    /// currently managing the given controller/child pair the call yields
    /// [`Status::UNSUPPORTED`].
    ///
    /// `language` must be one of the languages returned by
    /// [`supported_languages`]. The returned string is borrowed from the
    /// driver module, with the same validity rules as
    /// [`driver_name`](Self::driver_name).
    ///
    /// [`supported_languages`]: Self::supported_languages
    pub fn controller_name(
        &self,
        controller_handle: Handle,
        child_handle: Option<Handle>,
        language: &str,
    ) -> Result<&CStr16> {
        let language = language_to_cstr(language)?;
        let mut controller_name = ptr::null();
        unsafe {
            (self.0.get_controller_name)(
                &self.0,
                controller_handle.as_ptr(),
                Handle::opt_to_ptr(child_handle),
                language.as_ptr(),
                &mut controller_name,
            )
        }
        .to_result_with_val(|| unsafe { CStr16::from_ptr(controller_name.cast()) })
    }

    /// Negotiate a language against this instance's supported list.
    ///
    /// Shorthand for [`negotiate_language`] over
    /// [`supported_languages`](Self::supported_languages).
    pub fn negotiate<'p>(
        &self,
        caller_preferences: &[&'p str],
    ) -> core::result::Result<Option<&'p str>, LanguageError> {
        Ok(negotiate_language(
            caller_preferences,
            self.supported_languages()?,
        ))
    }
}

/// Pick the first language both the caller and the driver understand.
///
/// `caller_preferences` is the caller's own ordered preference list;
/// `supported` is the driver's list (ordered by the driver's preference).
/// When both sides rank their lists, the caller's order takes priority: the
/// result is the first caller preference that appears anywhere in the
/// driver's list.
///
/// Returns `None` when the lists do not intersect. The fallback policy in
/// that case (accept the driver's first listed language, skip naming
/// entirely, ...) is deliberately left to the caller.
#[must_use]
pub fn negotiate_language<'p>(
    caller_preferences: &[&'p str],
    supported: LanguageIter<'_>,
) -> Option<&'p str> {
    caller_preferences
        .iter()
        .copied()
        .find(|preference| supported.clone().any(|language| language == *preference))
}

/// Error returned by [`ComponentName::supported_languages`].
#[derive(Debug, Eq, PartialEq)]
pub enum LanguageError {
    /// The supported languages list contains a non-ASCII character at the
    /// specified index.
    Ascii {
        /// Index of the invalid character.
        index: usize,
    },
}

/// Iterator over the three-letter language codes a module supports.
///
/// Returned by [`ComponentName::supported_languages`]. The iteration order
/// is the driver's own preference order, not the caller's.
#[derive(Clone, Debug)]
pub struct LanguageIter<'a> {
    languages: &'a [u8],
}

impl<'a> LanguageIter<'a> {
    pub(crate) fn new(languages: *const u8) -> core::result::Result<Self, LanguageError> {
        let mut index = 0;
        loop {
            let c = unsafe { languages.add(index).read() };
            if c == 0 {
                break;
            } else if !c.is_ascii() {
                return Err(LanguageError::Ascii { index });
            } else {
                index += 1;
            }
        }

        Ok(Self {
            languages: unsafe { slice::from_raw_parts(languages, index) },
        })
    }
}

impl<'a> Iterator for LanguageIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.languages.is_empty() {
            return None;
        }

        let lang;
        if self.languages.len() <= 3 {
            lang = self.languages;
            self.languages = &[];
        } else {
            lang = &self.languages[..3];
            self.languages = &self.languages[3..];
        }

        // OK to unwrap because we already checked the string is ASCII.
        Some(core::str::from_utf8(lang).unwrap())
    }
}

/// Statically-sized buffer used to convert a `str` to a null-terminated C
/// string. ISO 639-2 codes are three characters plus the terminator; round
/// up to eight bytes.
type LanguageCStr = [u8; 8];

fn language_to_cstr(language: &str) -> Result<LanguageCStr> {
    let mut lang_cstr: LanguageCStr = [0; 8];
    // Ensure there's room for a null-terminator.
    if language.len() >= lang_cstr.len() - 1 {
        return Err(Error::from(Status::BUFFER_TOO_SMALL));
    }
    lang_cstr[..language.len()].copy_from_slice(language.as_bytes());
    // Assert that it's null-terminated.
    assert_eq!(*lang_cstr.last().unwrap(), 0);
    Ok(lang_cstr)
}
