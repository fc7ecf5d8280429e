use std::path::PathBuf;

use crate::foundation::core::{Rgba, Vec2};
use crate::model::property::Property;
use crate::model::scene::Scene;
use crate::model::slot::Slot;

/// A named time range on the document timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Marker {
    /// Marker name (`cm`).
    pub name: String,
    /// Start frame (`tm`).
    pub time: f32,
    /// Length in frames (`dr`).
    pub duration: f32,
}

/// Variable assigned to a layer's expressions at run time.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionVar {
    /// Index (`ix`) of the property the variable is visible to.
    pub ix: u32,
    /// Variable name.
    pub name: String,
    /// Current value.
    pub value: f64,
}

/// Layer transform properties, in Lottie units (percent scale/opacity, degrees).
#[derive(Clone, Debug, PartialEq)]
pub struct LayerTransform {
    /// Anchor point (`a`).
    pub anchor: Property<Vec2>,
    /// Position (`p`).
    pub position: Property<Vec2>,
    /// Scale in percent (`s`).
    pub scale: Property<Vec2>,
    /// Rotation in degrees (`r`).
    pub rotation: Property<f64>,
    /// Opacity in percent (`o`).
    pub opacity: Property<f64>,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            anchor: Property::constant(Vec2::ZERO),
            position: Property::constant(Vec2::ZERO),
            scale: Property::constant(Vec2::new(100.0, 100.0)),
            rotation: Property::constant(0.0),
            opacity: Property::constant(100.0),
        }
    }
}

/// Layer type (`ty`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    /// Nested composition (`0`).
    Precomp,
    /// Solid colour (`1`).
    Solid,
    /// Image (`2`).
    Image,
    /// Invisible transform carrier (`3`).
    Null,
    /// Vector shapes (`4`).
    Shape,
    /// Text (`5`).
    Text,
    /// Anything else.
    Other(u32),
}

impl LayerKind {
    /// Map a Lottie `ty` code.
    pub fn from_code(ty: u32) -> Self {
        match ty {
            0 => Self::Precomp,
            1 => Self::Solid,
            2 => Self::Image,
            3 => Self::Null,
            4 => Self::Shape,
            5 => Self::Text,
            other => Self::Other(other),
        }
    }
}

/// One document layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Layer name (`nm`).
    pub name: String,
    /// Layer index (`ind`).
    pub index: Option<u32>,
    /// Layer type.
    pub kind: LayerKind,
    /// First frame the layer is visible (`ip`).
    pub in_point: f32,
    /// Frame the layer stops being visible (`op`).
    pub out_point: f32,
    /// Time offset of the layer's own keyframes (`st`).
    pub start_time: f32,
    /// Hidden layers are never emitted.
    pub hidden: bool,
    /// Transform properties.
    pub transform: LayerTransform,
    /// Fill colour (solid colour or first shape fill).
    pub fill: Option<Property<Rgba>>,
    /// Text document.
    pub text: Option<Property<String>>,
    /// Expression variables assigned through the loader.
    pub vars: Vec<ExpressionVar>,
}

impl Layer {
    /// Return `true` when `frame` is inside `[in_point, out_point)`.
    pub fn is_visible_at(&self, frame: f32) -> bool {
        !self.hidden && self.in_point <= frame && frame < self.out_point
    }

    /// Set (or replace) an expression variable for property `ix`.
    pub fn assign(&mut self, ix: u32, name: &str, value: f64) {
        match self.vars.iter_mut().find(|v| v.ix == ix && v.name == name) {
            Some(var) => var.value = value,
            None => self.vars.push(ExpressionVar {
                ix,
                name: name.to_owned(),
                value,
            }),
        }
    }

    /// Look up a variable visible to property `ix`.
    pub fn var(&self, ix: Option<u32>, name: &str) -> Option<f64> {
        self.vars
            .iter()
            .find(|v| Some(v.ix) == ix && v.name == name)
            .map(|v| v.value)
    }
}

/// A parsed animation document.
#[derive(Clone, Debug)]
pub struct Document {
    /// Format version (`v`).
    pub version: Option<String>,
    /// Document name (`nm`).
    pub name: Option<String>,
    /// Directory relative asset references resolve against; carried, not interpreted.
    pub resource_dir: PathBuf,
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
    /// Frames per second.
    pub frame_rate: f32,
    /// In-point (`ip`).
    pub in_point: f32,
    /// Out-point (`op`).
    pub out_point: f32,
    /// Timeline markers in document order.
    pub markers: Vec<Marker>,
    /// Overridable values.
    pub slots: Vec<Slot>,
    /// Layers, topmost first (Lottie order).
    pub layers: Vec<Layer>,
    /// Root scene produced by the builder.
    pub root: Scene,
    /// Set once the scene has been handed to a caller.
    pub initiated: bool,
    /// `true` when at least one property carries a compiled expression.
    pub expressions: bool,
}

impl Document {
    /// Total frame count (`op - ip`).
    pub fn frame_count(&self) -> f32 {
        self.out_point - self.in_point
    }

    /// Find a slot by id.
    pub fn slot(&self, sid: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.sid() == sid)
    }

    /// Find a marker by exact name.
    pub fn marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    /// Find a layer by name.
    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    /// Drop transient per-frame render state ahead of the next update.
    pub fn clear(&mut self) {
        self.root.nodes.clear();
    }

    /// Return `true` when any slot differs from its default.
    pub fn is_overridden(&self) -> bool {
        self.slots.iter().any(Slot::is_overridden)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/document.rs"]
mod tests;
