//! EXIF orientation algebra.
//!
//! The EXIF `Orientation` tag stores one of 8 codes describing how a viewer
//! should transform the pixel data for display: the symmetries of a rectangle
//! (4 rotations, each with or without a mirror flip). This module holds the
//! bidirectional mapping between those codes and a semantic
//! (rotation, mirrored) pair, plus the composition rules for applying further
//! rotations and flips.
//!
//! Everything here is pure; reading and writing the tag itself happens in
//! [`crate::editor`].

use crate::error::{Error, Result};

/// A decoded EXIF orientation: a rotation in degrees plus a mirror flag.
///
/// `rotation` is always one of 0, 90, 180, 270 for values produced by this
/// module. The code ↔ pair mapping is a fixed 8-row table; note that at
/// 90°/270° the *unmirrored* forms are codes 6 and 8 while the mirrored forms
/// are 5 and 7 — the table is not a uniform rotation-row × mirror-column grid
/// and must not be derived.
///
/// # Example
///
/// ```rust
/// use exif_edit::orientation::Orientation;
///
/// let o = Orientation::from_code(1).unwrap();
/// assert_eq!(o.to_code().unwrap(), 1);
/// assert_eq!(o.rotated(90).to_code().unwrap(), 6);
/// assert_eq!(o.rotated(-90).to_code().unwrap(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    /// Clockwise display rotation in degrees.
    pub rotation: i32,
    /// Whether the image is mirrored.
    pub mirrored: bool,
}

impl Orientation {
    /// The identity orientation (code 1: no rotation, not mirrored).
    pub const NORMAL: Orientation = Orientation { rotation: 0, mirrored: false };

    /// Decode an orientation code read from the tag.
    ///
    /// Fails with [`Error::InvalidOrientationCode`] for anything outside
    /// {1..8}, which indicates a malformed or unexpected existing tag value.
    pub fn from_code(code: i64) -> Result<Self> {
        let (rotation, mirrored) = match code {
            1 => (0, false),
            2 => (0, true),
            3 => (180, false),
            4 => (180, true),
            5 => (90, true),
            6 => (90, false),
            7 => (270, true),
            8 => (270, false),
            _ => return Err(Error::InvalidOrientationCode(code)),
        };
        Ok(Orientation { rotation, mirrored })
    }

    /// Encode back to the wire code.
    ///
    /// Total over anything built from [`Orientation::from_code`] and the
    /// operations below, but checked anyway: a rotation delta that is not a
    /// multiple of 90 would land off the table, and that must surface as
    /// [`Error::InvalidOrientation`] rather than a silent wrong write.
    pub fn to_code(&self) -> Result<u8> {
        let code = match (self.rotation, self.mirrored) {
            (0, false) => 1,
            (0, true) => 2,
            (180, false) => 3,
            (180, true) => 4,
            (90, true) => 5,
            (90, false) => 6,
            (270, true) => 7,
            (270, false) => 8,
            _ => {
                return Err(Error::InvalidOrientation {
                    rotation: self.rotation,
                    mirrored: self.mirrored,
                });
            }
        };
        Ok(code)
    }

    /// Apply a rotation delta in degrees, keeping the mirror state.
    ///
    /// `delta` may be negative (counter-clockwise) or beyond ±360;
    /// normalization uses `rem_euclid` so the result is always non-negative
    /// (0° rotated by -90 is 270, not -90).
    #[must_use]
    pub fn rotated(self, delta: i32) -> Self {
        Orientation {
            rotation: (self.rotation + delta).rem_euclid(360),
            mirrored: self.mirrored,
        }
    }

    /// Flip the mirror state, keeping the rotation (a vertical mirror).
    #[must_use]
    pub fn mirrored_vertically(self) -> Self {
        Orientation { rotation: self.rotation, mirrored: !self.mirrored }
    }

    /// Mirror across the horizontal axis: a half-turn followed by a vertical
    /// flip. The rotate-then-toggle order is part of the contract; do not
    /// collapse it to a bare mirror toggle.
    #[must_use]
    pub fn mirrored_horizontally(self) -> Self {
        self.rotated(180).mirrored_vertically()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── code ↔ pair bijection ────────────────────────────────────────

    #[test]
    fn decode_encode_round_trips_all_codes() {
        for code in 1..=8 {
            let o = Orientation::from_code(code).unwrap();
            assert_eq!(i64::from(o.to_code().unwrap()), code, "code {code}");
        }
    }

    #[test]
    fn table_matches_exif_standard() {
        let expected = [
            (1, 0, false),
            (2, 0, true),
            (3, 180, false),
            (4, 180, true),
            (5, 90, true),
            (6, 90, false),
            (7, 270, true),
            (8, 270, false),
        ];
        for (code, rotation, mirrored) in expected {
            let o = Orientation::from_code(code).unwrap();
            assert_eq!(o, Orientation { rotation, mirrored }, "code {code}");
        }
    }

    #[test]
    fn decode_rejects_out_of_range() {
        for code in [0, 9, -1, 100] {
            assert!(matches!(
                Orientation::from_code(code),
                Err(Error::InvalidOrientationCode(c)) if c == code
            ));
        }
    }

    #[test]
    fn encode_rejects_off_table_rotation() {
        let o = Orientation { rotation: 45, mirrored: false };
        assert!(matches!(o.to_code(), Err(Error::InvalidOrientation { rotation: 45, .. })));
    }

    // ── rotation composition ─────────────────────────────────────────

    #[test]
    fn rotation_inverse_law() {
        for code in 1..=8 {
            let o = Orientation::from_code(code).unwrap();
            for k in [-8, -3, -1, 0, 1, 2, 5, 11] {
                assert_eq!(o.rotated(90 * k).rotated(-90 * k), o, "code {code}, k {k}");
            }
        }
    }

    #[test]
    fn negative_delta_normalizes_to_positive() {
        let o = Orientation::NORMAL.rotated(-90);
        assert_eq!(o.rotation, 270);
        assert_eq!(o.to_code().unwrap(), 8);
    }

    #[test]
    fn delta_beyond_full_turn_wraps() {
        assert_eq!(Orientation::NORMAL.rotated(450).rotation, 90);
        assert_eq!(Orientation::NORMAL.rotated(-450).rotation, 270);
        assert_eq!(Orientation::NORMAL.rotated(720), Orientation::NORMAL);
    }

    #[test]
    fn clockwise_quarter_turns_walk_the_table() {
        // 1 (0°) → 6 (90°) → 3 (180°)
        let o = Orientation::from_code(1).unwrap().rotated(90);
        assert_eq!(o.to_code().unwrap(), 6);
        let o = o.rotated(90);
        assert_eq!(o.to_code().unwrap(), 3);
    }

    #[test]
    fn counter_clockwise_from_code_6_yields_code_1() {
        let o = Orientation::from_code(6).unwrap().rotated(-90);
        assert_eq!(o.to_code().unwrap(), 1);
    }

    // ── mirrors ──────────────────────────────────────────────────────

    #[test]
    fn vertical_mirror_is_an_involution() {
        for code in 1..=8 {
            let o = Orientation::from_code(code).unwrap();
            assert_eq!(o.mirrored_vertically().mirrored_vertically(), o);
        }
    }

    #[test]
    fn vertical_mirror_keeps_rotation() {
        let o = Orientation::from_code(6).unwrap().mirrored_vertically();
        assert_eq!(o.rotation, 90);
        assert!(o.mirrored);
        assert_eq!(o.to_code().unwrap(), 5);
    }

    #[test]
    fn horizontal_mirror_from_normal_is_code_4() {
        // 1 → rotate 180 (code 3) → toggle mirror → code 4
        let o = Orientation::from_code(1).unwrap().mirrored_horizontally();
        assert_eq!(o.to_code().unwrap(), 4);
    }
}
