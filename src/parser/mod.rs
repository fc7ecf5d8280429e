//! JSON → [`Document`] conversion.
//!
//! Only the subset the scene builder consumes is modelled: header, markers, slots, and per layer
//! the transform, a fill colour and text. Unknown fields are ignored; unsupported property values
//! are logged and replaced by their defaults.

mod raw;
mod slots;
mod value;

use std::path::Path;

use serde_json::Value;

pub use slots::SlotParser;

use crate::expression::ExpressionEngine;
use crate::foundation::core::{Rgba, is_zero};
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::model::document::{Document, Layer, LayerKind, LayerTransform, Marker};
use crate::model::property::Property;
use crate::model::scene::Scene;
use crate::model::slot::SlotValue;
use raw::{RawDocument, RawLayer};
use value::PropertyCx;

/// Result of a full parse.
pub struct ParsedDocument {
    /// The document, with an empty root scene.
    pub document: Document,
    /// The document's own `slots` section, applied as defaults before the first build.
    pub default_slots: Option<SlotParser>,
}

/// Parses Lottie JSON into a [`Document`].
pub struct DocumentParser<'a> {
    content: &'a [u8],
    resource_dir: &'a Path,
    engine: Option<&'a ExpressionEngine>,
}

impl<'a> DocumentParser<'a> {
    /// `engine` is `None` when the consumer cannot evaluate expressions; `x` fields are then
    /// ignored.
    pub fn new(
        content: &'a [u8],
        resource_dir: &'a Path,
        engine: Option<&'a ExpressionEngine>,
    ) -> Self {
        Self {
            content,
            resource_dir,
            engine,
        }
    }

    /// Run the parse.
    #[tracing::instrument(skip_all, fields(bytes = self.content.len()))]
    pub fn parse(self) -> LoaderResult<ParsedDocument> {
        // Content may be NUL terminated.
        let end = self
            .content
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.content.len());
        let raw: RawDocument = serde_json::from_slice(&self.content[..end])
            .map_err(|e| LoaderError::parse(format!("invalid document: {e}")))?;

        if is_zero(raw.fr) || raw.fr < 0.0 {
            return Err(LoaderError::parse("frame rate is 0"));
        }
        if raw.op < raw.ip {
            return Err(LoaderError::parse(format!(
                "out-point {} precedes in-point {}",
                raw.op, raw.ip
            )));
        }

        let mut cx = PropertyCx::new(self.engine, raw.slots.as_ref());
        let layers: Vec<Layer> = raw
            .layers
            .iter()
            .map(|l| layer(&mut cx, l, raw.ip, raw.op))
            .collect();
        let slots = std::mem::take(&mut cx.slots);
        let expressions = cx.expressions;

        let markers = raw
            .markers
            .into_iter()
            .map(|m| Marker {
                name: m.cm,
                time: m.tm,
                duration: m.dr,
            })
            .collect();

        tracing::debug!(
            layers = layers.len(),
            slots = slots.len(),
            expressions,
            "document parsed"
        );

        let document = Document {
            version: raw.v,
            name: raw.nm,
            resource_dir: self.resource_dir.to_path_buf(),
            width: raw.w,
            height: raw.h,
            frame_rate: raw.fr,
            in_point: raw.ip,
            out_point: raw.op,
            markers,
            slots,
            layers,
            root: Scene::new(f64::from(raw.w), f64::from(raw.h)),
            initiated: false,
            expressions,
        };
        Ok(ParsedDocument {
            document,
            default_slots: raw.slots.map(SlotParser::from_map),
        })
    }
}

fn layer(cx: &mut PropertyCx<'_>, raw: &RawLayer, ip: f32, op: f32) -> Layer {
    let ks = raw.ks.as_ref();
    let mut transform = LayerTransform::default();
    if let Some(ks) = ks {
        let t = &mut transform;
        if let Some(p) = cx.optional(ks.a.as_ref(), value::vector, SlotValue::Vector, "anchor") {
            t.anchor = p;
        }
        if let Some(p) = cx.optional(ks.p.as_ref(), value::vector, SlotValue::Vector, "position") {
            t.position = p;
        }
        if let Some(p) = cx.optional(ks.s.as_ref(), value::vector, SlotValue::Vector, "scale") {
            t.scale = p;
        }
        if let Some(p) = cx.optional(ks.r.as_ref(), value::scalar, SlotValue::Scalar, "rotation") {
            t.rotation = p;
        }
        if let Some(p) = cx.optional(ks.o.as_ref(), value::scalar, SlotValue::Scalar, "opacity") {
            t.opacity = p;
        }
    }

    let kind = LayerKind::from_code(raw.ty);
    let fill = match kind {
        LayerKind::Solid => raw
            .sc
            .as_deref()
            .and_then(Rgba::from_hex)
            .map(Property::constant),
        LayerKind::Shape => {
            let c = first_fill(&raw.shapes);
            cx.optional(c, value::color, SlotValue::Color, "fill")
        }
        _ => None,
    };
    let text = match kind {
        LayerKind::Text => {
            let d = raw.t.as_ref().and_then(|t| t.get("d"));
            cx.optional(d, value::text, SlotValue::Text, "text")
        }
        _ => None,
    };

    Layer {
        name: raw.nm.clone(),
        index: raw.ind,
        kind,
        in_point: raw.ip.unwrap_or(ip),
        out_point: raw.op.unwrap_or(op),
        start_time: raw.st,
        hidden: raw.hd,
        transform,
        fill,
        text,
        vars: Vec::new(),
    }
}

/// Colour property of the first visible fill, searching groups depth first.
fn first_fill(items: &[Value]) -> Option<&Value> {
    for item in items {
        if item.get("hd").and_then(Value::as_bool) == Some(true) {
            continue;
        }
        match item.get("ty").and_then(Value::as_str) {
            Some("fl") => {
                if let Some(c) = item.get("c") {
                    return Some(c);
                }
            }
            Some("gr") => {
                let found = item
                    .get("it")
                    .and_then(Value::as_array)
                    .and_then(|it| first_fill(it));
                if found.is_some() {
                    return found;
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/parser/document.rs"]
mod tests;
