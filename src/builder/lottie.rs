use crate::builder::SceneBuilder;
use crate::expression::ExpressionEngine;
use crate::foundation::core::{Affine, Rgba, Vec2};
use crate::foundation::error::LoaderResult;
use crate::model::document::{Document, Layer, LayerKind};
use crate::model::property::{Animated, Lerp, Property};
use crate::model::scene::SceneNode;
use crate::model::slot::{Slot, SlotValue};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tween {
    to: f32,
    progress: f32,
}

/// Default [`SceneBuilder`]: evaluates layer transforms, fills and text into flat scene nodes.
#[derive(Clone, Debug)]
pub struct LottieBuilder {
    engine: Option<ExpressionEngine>,
    tween: Option<Tween>,
}

impl Default for LottieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LottieBuilder {
    /// Builder with expression support.
    pub fn new() -> Self {
        Self {
            engine: Some(ExpressionEngine::new()),
            tween: None,
        }
    }

    /// Builder that ignores expressions; documents parsed for it never carry any.
    pub fn without_expressions() -> Self {
        Self {
            engine: None,
            tween: None,
        }
    }
}

impl SceneBuilder for LottieBuilder {
    fn build(&mut self, doc: &mut Document) -> LoaderResult<()> {
        self.update(doc, 0.0)
    }

    #[tracing::instrument(skip(self, doc))]
    fn update(&mut self, doc: &mut Document, frame_no: f32) -> LoaderResult<()> {
        let frame = doc.in_point + frame_no;
        let target = self.tween.map(|t| (doc.in_point + t.to, f64::from(t.progress)));
        let ctx = EvalCtx {
            engine: self.engine.as_ref(),
            slots: &doc.slots,
            frame_rate: doc.frame_rate,
        };

        // Lottie lists layers topmost first.
        let nodes = doc
            .layers
            .iter()
            .rev()
            .filter(|l| l.kind != LayerKind::Null && l.is_visible_at(frame))
            .map(|layer| {
                let state = ctx.layer_state(layer, frame);
                let state = match target {
                    Some((to, t)) => LayerState::lerp(&state, &ctx.layer_state(layer, to), t),
                    None => state,
                };
                state.into_node(&layer.name)
            })
            .collect();

        doc.root.nodes = nodes;
        doc.root.frame = frame;
        Ok(())
    }

    fn tweening(&self) -> bool {
        self.tween.is_some()
    }

    fn on_tween(&mut self, to: f32, progress: f32) {
        self.tween = Some(Tween { to, progress });
    }

    fn off_tween(&mut self) {
        self.tween = None;
    }

    fn expressions(&self) -> Option<&ExpressionEngine> {
        self.engine.as_ref()
    }
}

/// Values a slot can replace.
trait Slotted: Sized {
    fn from_slot(v: &SlotValue) -> Option<&Animated<Self>>;
}

impl Slotted for f64 {
    fn from_slot(v: &SlotValue) -> Option<&Animated<Self>> {
        match v {
            SlotValue::Scalar(a) => Some(a),
            _ => None,
        }
    }
}

impl Slotted for Vec2 {
    fn from_slot(v: &SlotValue) -> Option<&Animated<Self>> {
        match v {
            SlotValue::Vector(a) => Some(a),
            _ => None,
        }
    }
}

impl Slotted for Rgba {
    fn from_slot(v: &SlotValue) -> Option<&Animated<Self>> {
        match v {
            SlotValue::Color(a) => Some(a),
            _ => None,
        }
    }
}

impl Slotted for String {
    fn from_slot(v: &SlotValue) -> Option<&Animated<Self>> {
        match v {
            SlotValue::Text(a) => Some(a),
            _ => None,
        }
    }
}

struct EvalCtx<'a> {
    engine: Option<&'a ExpressionEngine>,
    slots: &'a [Slot],
    frame_rate: f32,
}

impl EvalCtx<'_> {
    fn resolve<'p, T: Slotted>(&'p self, p: &'p Property<T>) -> &'p Animated<T> {
        p.sid
            .as_deref()
            .and_then(|sid| self.slots.iter().find(|s| s.sid() == sid))
            .and_then(|s| T::from_slot(s.value()))
            .unwrap_or(&p.value)
    }

    fn sample<T: Slotted + Lerp + Clone>(&self, p: &Property<T>, local: f32) -> T {
        self.resolve(p).sample(local)
    }

    fn scalar(&self, layer: &Layer, p: &Property<f64>, frame: f32) -> f64 {
        let value = self.sample(p, frame - layer.start_time);
        let (Some(engine), Some(expr)) = (self.engine, p.expression.as_ref()) else {
            return value;
        };
        let lookup = |name: &str| match name {
            "value" => Some(value),
            "frame" => Some(f64::from(frame)),
            "time" => Some(f64::from(frame / self.frame_rate)),
            other => layer.var(p.ix, other),
        };
        match engine.evaluate(expr, &lookup) {
            Ok(v) if v.is_finite() => v,
            Ok(v) => {
                tracing::debug!(layer = %layer.name, v, "non-finite expression result");
                value
            }
            Err(err) => {
                tracing::debug!(layer = %layer.name, %err, src = expr.source(), "expression failed");
                value
            }
        }
    }

    fn layer_state(&self, layer: &Layer, frame: f32) -> LayerState {
        let local = frame - layer.start_time;
        let t = &layer.transform;
        LayerState {
            anchor: self.sample(&t.anchor, local),
            position: self.sample(&t.position, local),
            scale: self.sample(&t.scale, local),
            rotation: self.scalar(layer, &t.rotation, frame),
            opacity: self.scalar(layer, &t.opacity, frame),
            fill: layer.fill.as_ref().map(|p| self.sample(p, local)),
            text: layer.text.as_ref().map(|p| self.sample(p, local)),
        }
    }
}

/// Evaluated layer values in Lottie units.
#[derive(Clone, Debug, PartialEq)]
struct LayerState {
    anchor: Vec2,
    position: Vec2,
    scale: Vec2,
    rotation: f64,
    opacity: f64,
    fill: Option<Rgba>,
    text: Option<String>,
}

impl LayerState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let opt = |x: Option<Rgba>, y: Option<Rgba>| match (x, y) {
            (Some(x), Some(y)) => Some(Rgba::lerp(&x, &y, t)),
            (x, _) => x,
        };
        Self {
            anchor: Lerp::lerp(&a.anchor, &b.anchor, t),
            position: Lerp::lerp(&a.position, &b.position, t),
            scale: Lerp::lerp(&a.scale, &b.scale, t),
            rotation: Lerp::lerp(&a.rotation, &b.rotation, t),
            opacity: Lerp::lerp(&a.opacity, &b.opacity, t),
            fill: opt(a.fill, b.fill),
            text: match (&a.text, &b.text) {
                (Some(x), Some(y)) => Some(String::lerp(x, y, t)),
                (x, _) => x.clone(),
            },
        }
    }

    fn into_node(self, name: &str) -> SceneNode {
        let transform = Affine::translate(self.position)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(self.scale.x / 100.0, self.scale.y / 100.0)
            * Affine::translate(-self.anchor);
        SceneNode {
            name: name.to_owned(),
            transform,
            opacity: (self.opacity / 100.0).clamp(0.0, 1.0),
            fill: self.fill,
            text: self.text,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/builder/lottie.rs"]
mod tests;
