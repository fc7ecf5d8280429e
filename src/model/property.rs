use crate::expression::Expression;
use crate::foundation::core::{Rgba, Vec2};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

// Text never blends; it switches once the target is reached.
impl Lerp for String {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if t < 1.0 { a.clone() } else { b.clone() }
    }
}

/// One keyframe of an animated value.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<T> {
    /// Document frame at which `value` is reached.
    pub time: f32,
    /// Value at `time`.
    pub value: T,
    /// Hold `value` until the next key instead of interpolating.
    pub hold: bool,
}

/// A static or keyframed value.
#[derive(Clone, Debug, PartialEq)]
pub enum Animated<T> {
    /// Constant value.
    Static(T),
    /// Keyframes sorted by `time`; never empty.
    Keyframes(Vec<Keyframe<T>>),
}

impl<T> Animated<T>
where
    T: Lerp + Clone,
{
    /// Sample at a document frame number.
    pub fn sample(&self, frame: f32) -> T {
        let keys = match self {
            Self::Static(v) => return v.clone(),
            Self::Keyframes(keys) => keys,
        };

        let idx = keys.partition_point(|k| k.time <= frame);
        if idx == 0 {
            return keys[0].value.clone();
        }
        if idx >= keys.len() {
            return keys[keys.len() - 1].value.clone();
        }

        let a = &keys[idx - 1];
        let b = &keys[idx];
        let span = b.time - a.time;
        if a.hold || span <= 0.0 {
            return a.value.clone();
        }
        let t = f64::from((frame - a.time) / span);
        T::lerp(&a.value, &b.value, t)
    }

    /// Return `true` for keyframed values.
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Keyframes(_))
    }
}

/// An animatable document property.
#[derive(Clone, Debug, PartialEq)]
pub struct Property<T> {
    /// Keyframed or static value as authored.
    pub value: Animated<T>,
    /// Slot id binding this property to an overridable value.
    pub sid: Option<String>,
    /// Property index (`ix`) used to address expression variables.
    pub ix: Option<u32>,
    /// Compiled expression, only present when the builder supports expressions.
    pub expression: Option<Expression>,
}

impl<T> Property<T> {
    /// Unbound, expression-free constant property.
    pub fn constant(value: T) -> Self {
        Self {
            value: Animated::Static(value),
            sid: None,
            ix: None,
            expression: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/property.rs"]
mod tests;
