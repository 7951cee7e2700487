//! Typed tag access over a [`MetadataBackend`].
//!
//! A [`TagView`] is a short-lived borrow of an editor's backend, photo path,
//! and backup policy. It owns the loosely-typed edge of the system: the
//! backend's scalar-or-sequence keyword ambiguity is resolved here, once, so
//! callers always observe keywords as a `Vec<String>`.

use std::path::Path;

use crate::backend::{MetadataBackend, TagValue, TagWrite};
use crate::error::{Error, Result};

/// Tag name keywords are read under (what exiftool reports in `-j` output).
pub const KEYWORDS_TAG: &str = "Keywords";

/// Group-qualified tag name keywords are written under.
pub const KEYWORDS_WRITE_TAG: &str = "IPTC:Keywords";

/// Typed get/set operations for one photo's tags.
pub struct TagView<'a> {
    backend: &'a dyn MetadataBackend,
    photo: &'a Path,
    keep_backup: bool,
}

impl<'a> TagView<'a> {
    pub(crate) fn new(backend: &'a dyn MetadataBackend, photo: &'a Path, keep_backup: bool) -> Self {
        TagView { backend, photo, keep_backup }
    }

    /// Read one named tag. `Ok(None)` means the photo has no value for it.
    pub fn get_tag(&self, tag: &str) -> Result<Option<TagValue>> {
        self.backend.read_tag(self.photo, tag)
    }

    /// Write a single value for a tag.
    pub fn set_tag(&self, tag: &str, value: &str) -> Result<()> {
        self.set_tag_values(tag, std::slice::from_ref(&value))
    }

    /// Write a sequence of values for a tag: one assignment per element, all
    /// in a single backend call.
    pub fn set_tag_values<S: AsRef<str>>(&self, tag: &str, values: &[S]) -> Result<()> {
        let writes: Vec<TagWrite> = values
            .iter()
            .map(|v| TagWrite::set(tag, v.as_ref()))
            .collect();
        self.backend.write_tags(self.photo, &writes, self.keep_backup)
    }

    /// The photo's keywords, always as a sequence: absent becomes empty, a
    /// bare scalar becomes a one-element sequence.
    pub fn keywords(&self) -> Result<Vec<String>> {
        Ok(self
            .get_tag(KEYWORDS_TAG)?
            .map(TagValue::into_strings)
            .unwrap_or_default())
    }

    /// Append keywords additively (`+=`), one backend call for the lot.
    ///
    /// No deduplication: adding an existing keyword again is accepted and may
    /// produce a duplicate entry, mirroring the backend's own additive
    /// semantics.
    pub fn add_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> Result<()> {
        let writes: Vec<TagWrite> = keywords
            .iter()
            .map(|kw| TagWrite::add(KEYWORDS_WRITE_TAG, kw.as_ref()))
            .collect();
        self.backend.write_tags(self.photo, &writes, self.keep_backup)
    }

    /// Replace the keyword set: clear, then add.
    ///
    /// Not atomic — the backend has no transactions. If the clear succeeds
    /// but the add fails, the photo is left with an empty keyword set and the
    /// add's error is returned.
    pub fn set_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> Result<()> {
        self.clear_keywords()?;
        self.add_keywords(keywords)
    }

    /// Clear the keyword tag. Clearing a photo that has no keywords is a
    /// no-op success, not an error; all other backend failures propagate.
    pub fn clear_keywords(&self) -> Result<()> {
        match self.set_tag(KEYWORDS_TAG, "") {
            Err(Error::NothingToWrite) => {
                log::debug!("no keywords to clear on {}", self.photo.display());
                Ok(())
            }
            other => other,
        }
    }
}
