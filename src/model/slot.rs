use crate::foundation::core::{Rgba, Vec2};
use crate::model::property::Animated;

/// Kind of value a slot holds; overrides must match it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SlotKind {
    /// Single number (opacity, rotation, ...).
    Scalar,
    /// 2D vector (position, scale, anchor).
    Vector,
    /// RGBA colour.
    Color,
    /// Text document string.
    Text,
}

/// Value carried by a slot.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotValue {
    /// Scalar value.
    Scalar(Animated<f64>),
    /// Vector value.
    Vector(Animated<Vec2>),
    /// Colour value.
    Color(Animated<Rgba>),
    /// Text value.
    Text(Animated<String>),
}

impl SlotValue {
    /// Kind of this value.
    pub fn kind(&self) -> SlotKind {
        match self {
            Self::Scalar(_) => SlotKind::Scalar,
            Self::Vector(_) => SlotKind::Vector,
            Self::Color(_) => SlotKind::Color,
            Self::Text(_) => SlotKind::Text,
        }
    }
}

/// A named, overridable document value.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    sid: String,
    value: SlotValue,
    default: SlotValue,
}

impl Slot {
    /// New slot whose default is its initial value.
    pub fn new(sid: impl Into<String>, value: SlotValue) -> Self {
        Self {
            sid: sid.into(),
            default: value.clone(),
            value,
        }
    }

    /// Slot identifier.
    pub fn sid(&self) -> &str {
        &self.sid
    }

    /// Kind every override must match.
    pub fn kind(&self) -> SlotKind {
        self.default.kind()
    }

    /// Current value.
    pub fn value(&self) -> &SlotValue {
        &self.value
    }

    /// Value restored by [`Slot::reset`].
    pub fn default_value(&self) -> &SlotValue {
        &self.default
    }

    /// Replace the current value.
    ///
    /// With `by_default` the new value also becomes the default. Returns `false` and leaves the
    /// slot untouched when the kinds differ.
    pub fn set(&mut self, value: SlotValue, by_default: bool) -> bool {
        if value.kind() != self.kind() {
            return false;
        }
        if by_default {
            self.default = value.clone();
        }
        self.value = value;
        true
    }

    /// Restore the default value.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }

    /// Return `true` when the current value differs from the default.
    pub fn is_overridden(&self) -> bool {
        self.value != self.default
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/slot.rs"]
mod tests;
