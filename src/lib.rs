//! # exif-edit
//!
//! High-level editor for an image file's embedded metadata (EXIF/IPTC tags):
//! rotate, mirror, keyword management, and timestamp setting without knowing
//! raw tag encodings. Tag reads and writes go through the `exiftool`
//! command-line utility; this crate never touches the binary EXIF format
//! itself.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exif_edit::backend::ExifTool;
//! use exif_edit::editor::PhotoEditor;
//!
//! fn main() -> exif_edit::error::Result<()> {
//!     // Probe once for exiftool; a missing install fails here, up front.
//!     let backend = ExifTool::probe()?;
//!     let editor = PhotoEditor::new(Box::new(backend), "holiday.jpg");
//!
//!     // Orientation is edited losslessly via the EXIF orientation tag.
//!     editor.rotate_cw(1)?;
//!     editor.mirror_horizontally()?;
//!
//!     // Keywords always read back as a list, even when stored as a scalar.
//!     editor.add_keywords(&["beach", "sunset"])?;
//!     println!("{:?}", editor.keywords()?);
//!
//!     // Timestamps accept YYYY:MM:DD, the full form, or chrono values;
//!     // None means now.
//!     editor.set_original_date_time(Some("2020:01:05".into()))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How rotation works
//!
//! The EXIF orientation tag holds one of 8 codes covering the symmetries of
//! a rectangle: 4 rotations, each with or without a mirror flip. Rotating or
//! mirroring a photo is a read of the current code, a pure transformation in
//! [`orientation`], and a write of the new code — pixel data is never
//! touched. The read/write pair is not transactional; see
//! [`editor::PhotoEditor`] for the concurrency caveats.
//!
//! ## Modules
//!
//! - [`orientation`] — the pure orientation code ↔ (rotation, mirror) algebra
//! - [`backend`] — the metadata backend trait and the exiftool subprocess
//!   implementation
//! - [`tags`] — typed tag access and keyword normalization
//! - [`datetime`] — datetime validation and normalization
//! - [`editor`] — the high-level photo editing surface
//! - [`config`] — configuration types and loading/saving
//! - [`error`] — the error type

pub mod backend;
pub mod config;
pub mod datetime;
pub mod editor;
pub mod error;
pub mod orientation;
pub mod tags;
