//! The photo editor: the public editing surface over one image file.
//!
//! A [`PhotoEditor`] holds a photo path, a backup policy, and a
//! [`MetadataBackend`]; every operation re-reads the photo's current state,
//! transforms it, and writes back. Nothing is cached between operations.
//!
//! Rotate and mirror are one read plus one write with no locking: if another
//! process touches the file between the two, the write proceeds against stale
//! state undetected. That is an accepted limitation of the external store,
//! not something this layer papers over.

use std::path::{Path, PathBuf};

use crate::backend::{ExifTool, MetadataBackend};
use crate::config::Config;
use crate::datetime::DateTimeValue;
use crate::error::{Error, Result};
use crate::orientation::Orientation;
use crate::tags::TagView;

/// Orientation tag, `#` suffix for the numeric value (no print conversion).
const ORIENTATION_TAG: &str = "Orientation#";

/// When the picture was taken.
const DATE_TIME_ORIGINAL_TAG: &str = "DateTimeOriginal";

/// Filesystem modification time, as exiftool exposes it.
const FILE_MODIFY_DATE_TAG: &str = "FileModifyDate";

/// High-level metadata editor for a single photo.
///
/// # Example
///
/// ```rust,no_run
/// use exif_edit::backend::ExifTool;
/// use exif_edit::editor::PhotoEditor;
///
/// let backend = ExifTool::probe()?;
/// let editor = PhotoEditor::new(Box::new(backend), "holiday.jpg");
///
/// editor.rotate_cw(1)?;
/// editor.add_keyword("beach")?;
/// editor.set_original_date_time(Some("2020:01:05".into()))?;
/// # Ok::<(), exif_edit::error::Error>(())
/// ```
pub struct PhotoEditor {
    backend: Box<dyn MetadataBackend>,
    photo: PathBuf,
    keep_backup: bool,
}

impl PhotoEditor {
    /// Build an editor over an already-probed backend.
    ///
    /// Backups are off by default: the original file is rewritten in place.
    pub fn new(backend: Box<dyn MetadataBackend>, photo: impl Into<PathBuf>) -> Self {
        PhotoEditor { backend, photo: photo.into(), keep_backup: false }
    }

    /// Build an editor from a [`Config`]: probes the configured exiftool
    /// program and applies the configured backup policy.
    pub fn with_config(config: &Config, photo: impl Into<PathBuf>) -> Result<Self> {
        let backend = ExifTool::probe_with(&config.backend.program)?;
        Ok(Self::new(Box::new(backend), photo).keep_backup(config.output.keep_backup))
    }

    /// Keep the backend's backup copy of the original file on every write.
    #[must_use]
    pub fn keep_backup(mut self, keep: bool) -> Self {
        self.keep_backup = keep;
        self
    }

    /// The photo this editor targets.
    pub fn photo(&self) -> &Path {
        &self.photo
    }

    /// Typed tag access for this photo.
    pub fn tags(&self) -> TagView<'_> {
        TagView::new(self.backend.as_ref(), &self.photo, self.keep_backup)
    }

    // ── orientation ──────────────────────────────────────────────────

    /// Rotate clockwise in 90° increments. Any count is accepted; four
    /// quarter-turns are a full turn, so only `n % 4` matters.
    pub fn rotate_cw(&self, n: u32) -> Result<()> {
        self.transform_orientation(|o| o.rotated(90 * (n % 4) as i32))
    }

    /// Rotate counter-clockwise in 90° increments.
    pub fn rotate_ccw(&self, n: u32) -> Result<()> {
        self.transform_orientation(|o| o.rotated(-90 * (n % 4) as i32))
    }

    /// Mirror across the vertical axis.
    pub fn mirror_vertically(&self) -> Result<()> {
        self.transform_orientation(Orientation::mirrored_vertically)
    }

    /// Mirror across the horizontal axis (half-turn plus flip).
    pub fn mirror_horizontally(&self) -> Result<()> {
        self.transform_orientation(Orientation::mirrored_horizontally)
    }

    /// Read-decode-transform-encode-write. One read, one write; no lock is
    /// taken against concurrent external modification.
    fn transform_orientation(&self, f: impl FnOnce(Orientation) -> Orientation) -> Result<()> {
        let current = self.orientation()?;
        let next = f(current);
        let code = next.to_code()?;
        log::debug!(
            "{}: orientation {}°/{} -> code {code}",
            self.photo.display(),
            next.rotation,
            if next.mirrored { "mirrored" } else { "normal" },
        );
        self.tags().set_tag(ORIENTATION_TAG, &code.to_string())
    }

    /// The photo's current orientation. A photo with no orientation tag is
    /// treated as unrotated and unmirrored (code 1).
    fn orientation(&self) -> Result<Orientation> {
        match self.tags().get_tag(ORIENTATION_TAG)? {
            Some(value) => match value.as_i64() {
                Some(code) => Orientation::from_code(code),
                None => Err(Error::MalformedOrientationTag(
                    value.into_strings().join(", "),
                )),
            },
            None => Ok(Orientation::NORMAL),
        }
    }

    // ── keywords ─────────────────────────────────────────────────────

    /// The photo's keywords, always as a sequence (possibly empty).
    pub fn keywords(&self) -> Result<Vec<String>> {
        self.tags().keywords()
    }

    /// Add one keyword.
    pub fn add_keyword(&self, keyword: &str) -> Result<()> {
        self.add_keywords(std::slice::from_ref(&keyword))
    }

    /// Add keywords in one backend call. Duplicates are not filtered.
    pub fn add_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> Result<()> {
        self.tags().add_keywords(keywords)
    }

    /// Replace the keyword set (clear, then add; see
    /// [`TagView::set_keywords`] for the non-atomicity caveat).
    pub fn set_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> Result<()> {
        self.tags().set_keywords(keywords)
    }

    /// Remove all keywords. Succeeds even when there were none.
    pub fn clear_keywords(&self) -> Result<()> {
        self.tags().clear_keywords()
    }

    // ── timestamps ───────────────────────────────────────────────────

    /// Set when the picture was taken. `None` means the current local time.
    pub fn set_original_date_time(&self, value: Option<DateTimeValue>) -> Result<()> {
        self.set_date_time_field(DATE_TIME_ORIGINAL_TAG, value)
    }

    /// Set the file's modification time, like `touch`. `None` means the
    /// current local time.
    pub fn set_modification_date_time(&self, value: Option<DateTimeValue>) -> Result<()> {
        self.set_date_time_field(FILE_MODIFY_DATE_TAG, value)
    }

    fn set_date_time_field(&self, tag: &str, value: Option<DateTimeValue>) -> Result<()> {
        let value = value.unwrap_or_else(DateTimeValue::now);
        // Validation happens before any write is attempted.
        let normalized = value.normalize()?;
        log::debug!("{}: {tag} = {normalized}", self.photo.display());
        self.tags().set_tag(tag, &normalized)
    }
}
