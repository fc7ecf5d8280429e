pub use kurbo::{Affine, Point, Rect, Vec2};

/// Tolerance used for "is this float zero / equal" checks.
pub const FLOAT_EPSILON: f32 = 1.0e-6;

/// Seeks closer than this to the last served frame are dropped.
///
/// Tunable; tied to the frame snapping precision below.
pub const FRAME_SKIP_EPSILON: f32 = 0.0009;

/// Requested frame numbers are snapped to multiples of `1 / FRAME_SNAP_SCALE`.
pub const FRAME_SNAP_SCALE: f32 = 10_000.0;

/// Return `true` when `v` is within [`FLOAT_EPSILON`] of zero.
pub fn is_zero(v: f32) -> bool {
    v.abs() < FLOAT_EPSILON
}

/// Return `true` when `a` and `b` differ by less than [`FLOAT_EPSILON`].
pub fn is_equal(a: f32, b: f32) -> bool {
    is_zero(a - b)
}

/// Straight-alpha RGBA colour with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Opaque colour from RGB channels.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a `#rrggbb` / `#rrggbbaa` hex string (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| -> Option<f64> {
            let v = u8::from_str_radix(s.get(i..i + 2)?, 16).ok()?;
            Some(f64::from(v) / 255.0)
        };
        match s.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
