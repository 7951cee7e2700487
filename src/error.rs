//! Error types for the exif-edit library.

use thiserror::Error;

/// Main error type for the exif-edit library.
#[derive(Error, Debug)]
pub enum Error {
    /// The metadata backend (exiftool) is not installed or not usable.
    ///
    /// Raised by [`crate::backend::ExifTool::probe`] and latched: every
    /// operation on an editor built over a failed probe reports this at the
    /// point of first use.
    #[error(
        "exiftool not found — the exiftool command-line utility must be installed \
         (see https://exiftool.org/)"
    )]
    BackendUnavailable,

    /// The backend ran but reported a failure. The message is passed through
    /// verbatim.
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend ran but had nothing to change (exiftool's
    /// "0 image files updated" outcome).
    ///
    /// Only [`crate::tags::TagView::clear_keywords`] treats this as success;
    /// everywhere else it surfaces like any other failure.
    #[error("backend had nothing to write")]
    NothingToWrite,

    /// An orientation tag value outside {1..8} was read from the image.
    #[error("invalid EXIF orientation code {0} (expected 1..=8)")]
    InvalidOrientationCode(i64),

    /// A non-numeric orientation tag value was read from the image. Carries
    /// the offending value verbatim.
    #[error("malformed EXIF orientation tag value '{0}' (expected a code in 1..=8)")]
    MalformedOrientationTag(String),

    /// A (rotation, mirror) pair with no corresponding orientation code.
    /// Reachable only through rotation deltas that are not multiples of 90.
    #[error("no EXIF orientation code for rotation {rotation}° (mirrored: {mirrored})")]
    InvalidOrientation { rotation: i32, mirrored: bool },

    /// A caller-supplied datetime string matched neither `YYYY:MM:DD` nor
    /// `YYYY:MM:DD HH:MM:SS`.
    #[error("invalid datetime value '{0}' (expected YYYY:MM:DD or YYYY:MM:DD HH:MM:SS)")]
    InvalidDateTimeFormat(String),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
