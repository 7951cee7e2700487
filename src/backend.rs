//! Metadata backend: the external collaborator that reads and writes named
//! tags in an image file.
//!
//! The production implementation, [`ExifTool`], shells out to the `exiftool`
//! command-line utility — reads go through `-j` (JSON output), writes through
//! `-TAG=VALUE` assignment arguments. Everything above this module talks to
//! the [`MetadataBackend`] trait, so tests run against an in-memory fake.
//!
//! Each call is one independent subprocess invocation: synchronous, blocking,
//! no timeout, no retries. A hang in the tool hangs the operation.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Default name of the exiftool binary, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "exiftool";

/// File name used by the availability probe. Deliberately nonsense: the
/// expected reply for a working install is "File not found".
const PROBE_FILE: &str = "exif-edit-availability-probe.jpg";

/// One tag value as reported by the backend.
///
/// exiftool's `-j` output maps a tag to a JSON string, number, or array;
/// this union resolves that ambiguity once, at the backend boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Number(i64),
    List(Vec<String>),
}

impl TagValue {
    /// Convert a JSON value from `-j` output. Returns `None` for null.
    fn from_json(value: &serde_json::Value) -> Option<TagValue> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(TagValue::Text(s.clone())),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(TagValue::Number(i)),
                None => Some(TagValue::Text(n.to_string())),
            },
            serde_json::Value::Array(items) => Some(TagValue::List(
                items.iter().map(json_scalar_to_string).collect(),
            )),
            other => Some(TagValue::Text(other.to_string())),
        }
    }

    /// The value as an integer, if it is one (or a numeric string).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagValue::Number(n) => Some(*n),
            TagValue::Text(s) => s.trim().parse().ok(),
            TagValue::List(_) => None,
        }
    }

    /// The value as a sequence of strings: a scalar becomes a one-element
    /// sequence, a list is returned as-is.
    pub fn into_strings(self) -> Vec<String> {
        match self {
            TagValue::Text(s) => vec![s],
            TagValue::Number(n) => vec![n.to_string()],
            TagValue::List(items) => items,
        }
    }
}

fn json_scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// How a [`TagWrite`] assigns its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOp {
    /// Replace the tag's value (`-TAG=VALUE`).
    Set,
    /// Append to a list-valued tag (`-TAG+=VALUE`).
    Add,
}

/// One tag assignment in a write call.
///
/// Multiple assignments are passed in a single backend invocation, which is
/// what makes multi-keyword writes one round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWrite {
    pub tag: String,
    pub op: TagOp,
    pub value: String,
}

impl TagWrite {
    pub fn set(tag: impl Into<String>, value: impl Into<String>) -> Self {
        TagWrite { tag: tag.into(), op: TagOp::Set, value: value.into() }
    }

    pub fn add(tag: impl Into<String>, value: impl Into<String>) -> Self {
        TagWrite { tag: tag.into(), op: TagOp::Add, value: value.into() }
    }

    /// Render as an exiftool assignment argument.
    fn to_arg(&self) -> OsString {
        let op = match self.op {
            TagOp::Set => "=",
            TagOp::Add => "+=",
        };
        OsString::from(format!("-{}{}{}", self.tag, op, self.value))
    }
}

/// The external capability that reads and writes named tags for one photo.
///
/// `keep_backup` controls the overwrite policy: `false` rewrites the original
/// in place, `true` leaves the tool's backup copy next to it.
pub trait MetadataBackend {
    /// Read one named tag. `Ok(None)` means the backend reports no value for
    /// that name.
    fn read_tag(&self, photo: &Path, tag: &str) -> Result<Option<TagValue>>;

    /// Apply one or more tag assignments in a single call.
    fn write_tags(&self, photo: &Path, writes: &[TagWrite], keep_backup: bool) -> Result<()>;
}

/// The exiftool subprocess backend.
///
/// Construct via [`ExifTool::probe`], which checks once that the binary is
/// actually present and answering; the probed instance is then handed to
/// [`crate::editor::PhotoEditor`]. A failed probe surfaces as
/// [`Error::BackendUnavailable`] immediately, so no operation ever runs
/// against a missing tool.
///
/// # Example
///
/// ```rust,no_run
/// use exif_edit::backend::ExifTool;
///
/// let backend = ExifTool::probe()?;
/// # Ok::<(), exif_edit::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: String,
}

impl ExifTool {
    /// Probe for `exiftool` on `PATH`.
    pub fn probe() -> Result<Self> {
        Self::probe_with(DEFAULT_PROGRAM)
    }

    /// Probe for the tool under a specific program name or path.
    ///
    /// Issues a harmless read against a non-existent file: a working install
    /// answers "File not found", anything else (including a spawn failure)
    /// means the tool is unusable.
    pub fn probe_with(program: &str) -> Result<Self> {
        let output = Command::new(program).arg(PROBE_FILE).output().map_err(|e| {
            log::debug!("probe: failed to spawn {program}: {e}");
            Error::BackendUnavailable
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if probe_reply_is_healthy(&stdout, &stderr) {
            log::debug!("probe: {program} is available");
            Ok(ExifTool { program: program.to_string() })
        } else {
            log::warn!("probe: {program} gave an unexpected reply: {}", stderr.trim());
            Err(Error::BackendUnavailable)
        }
    }

    /// The program name this backend invokes.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[OsString]) -> Result<std::process::Output> {
        log::debug!("exiftool {:?}", args);
        Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| Error::Backend(format!("failed to run {}: {e}", self.program)))
    }
}

impl MetadataBackend for ExifTool {
    fn read_tag(&self, photo: &Path, tag: &str) -> Result<Option<TagValue>> {
        let args = read_args(photo, tag);
        let output = self.run(&args)?;

        if !output.status.success() {
            return Err(Error::Backend(failure_message(&output)));
        }
        parse_read_output(&String::from_utf8_lossy(&output.stdout), tag)
    }

    fn write_tags(&self, photo: &Path, writes: &[TagWrite], keep_backup: bool) -> Result<()> {
        if writes.is_empty() {
            return Ok(());
        }
        let args = write_args(photo, writes, keep_backup);
        let output = self.run(&args)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        match classify_write_output(output.status.success(), &stdout, &stderr) {
            WriteOutcome::Updated => Ok(()),
            WriteOutcome::NothingToWrite => Err(Error::NothingToWrite),
            WriteOutcome::Failed => Err(Error::Backend(failure_message(&output))),
        }
    }
}

/// A working exiftool answers a read of a missing file with "File not found".
fn probe_reply_is_healthy(stdout: &str, stderr: &str) -> bool {
    stderr.contains("File not found") || stdout.contains("File not found")
}

fn read_args(photo: &Path, tag: &str) -> Vec<OsString> {
    vec![
        OsString::from("-j"),
        OsString::from(format!("-{tag}")),
        photo.as_os_str().to_os_string(),
    ]
}

fn write_args(photo: &Path, writes: &[TagWrite], keep_backup: bool) -> Vec<OsString> {
    let mut args = Vec::with_capacity(writes.len() + 2);
    if !keep_backup {
        args.push(OsString::from("-overwrite_original_in_place"));
    }
    args.extend(writes.iter().map(TagWrite::to_arg));
    args.push(photo.as_os_str().to_os_string());
    args
}

/// Decode a `-j` reply: a one-element JSON array holding a record keyed by
/// tag name. A `#` suffix on the request (numeric-value form, e.g.
/// `Orientation#`) is not echoed in the reply key.
fn parse_read_output(stdout: &str, tag: &str) -> Result<Option<TagValue>> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(stdout)
            .map_err(|e| Error::Backend(format!("unparseable exiftool -j output: {e}")))?;

    let key = tag.trim_end_matches('#');
    Ok(records
        .first()
        .and_then(|record| record.get(key))
        .and_then(TagValue::from_json))
}

/// What a finished write invocation amounted to.
#[derive(Debug, PartialEq, Eq)]
enum WriteOutcome {
    Updated,
    NothingToWrite,
    Failed,
}

/// Distinguish the benign nothing-changed outcome from real failures.
///
/// exiftool reports "Nothing to do." / "0 image files updated" when an
/// assignment changed nothing, e.g. clearing keywords that are not there.
fn classify_write_output(success: bool, stdout: &str, stderr: &str) -> WriteOutcome {
    if success {
        WriteOutcome::Updated
    } else if stderr.contains("Nothing to do") || stdout.contains("0 image files updated") {
        WriteOutcome::NothingToWrite
    } else {
        WriteOutcome::Failed
    }
}

fn failure_message(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = stderr.trim();
    if message.is_empty() {
        format!("exiftool exited with {}", output.status)
    } else {
        message.to_string()
    }
}
