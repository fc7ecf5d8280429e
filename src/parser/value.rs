use serde_json::{Map, Value};

use crate::expression::ExpressionEngine;
use crate::foundation::core::{Rgba, Vec2};
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::model::property::{Animated, Keyframe, Property};
use crate::model::slot::{Slot, SlotValue};

pub(crate) type Convert<T> = fn(&Value) -> Option<T>;

pub(crate) fn scalar(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::Array(a) => a.first().and_then(Value::as_f64),
        _ => None,
    }
}

pub(crate) fn vector(v: &Value) -> Option<Vec2> {
    let a = v.as_array()?;
    Some(Vec2::new(a.first()?.as_f64()?, a.get(1)?.as_f64()?))
}

/// Colours are normally `[0, 1]`; some exporters write `[0, 255]`.
pub(crate) fn color(v: &Value) -> Option<Rgba> {
    let c = v
        .as_array()?
        .iter()
        .map(Value::as_f64)
        .collect::<Option<Vec<f64>>>()?;
    if c.len() < 3 {
        return None;
    }
    let scale = if c.iter().any(|&x| x > 1.0) { 255.0 } else { 1.0 };
    let alpha = c.get(3).copied().unwrap_or(scale);
    Some(Rgba {
        r: c[0] / scale,
        g: c[1] / scale,
        b: c[2] / scale,
        a: alpha / scale,
    })
}

/// A text document (`{"t": "..."}`) or a bare string.
pub(crate) fn text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => o.get("t").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

fn flag(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Bool(b)) => *b,
        Some(v) => v.as_u64() == Some(1),
        None => false,
    }
}

fn is_keyframe_list(k: &Value) -> bool {
    k.as_array()
        .and_then(|a| a.first())
        .and_then(Value::as_object)
        .is_some_and(|o| o.contains_key("t"))
}

/// Convert an `{"a": .., "k": ..}` property body into an animated value.
pub(crate) fn animated<T>(v: &Value, conv: Convert<T>) -> LoaderResult<Animated<T>> {
    let k = v
        .get("k")
        .ok_or_else(|| LoaderError::parse("property has no `k` value"))?;

    if !flag(v.get("a")) && !is_keyframe_list(k) {
        return conv(k)
            .map(Animated::Static)
            .ok_or_else(|| LoaderError::parse(format!("unsupported property value `{k}`")));
    }

    let list = k
        .as_array()
        .ok_or_else(|| LoaderError::parse("animated property without keyframe list"))?;
    let mut keys = Vec::with_capacity(list.len());
    // Older exporters leave the last key without `s` and carry its value in the previous `e`.
    let mut carried = None;
    for key in list {
        let Some(time) = key.get("t").and_then(Value::as_f64) else {
            continue;
        };
        let value = key.get("s").and_then(conv).or_else(|| carried.take());
        carried = key.get("e").and_then(conv);
        let Some(value) = value else {
            continue;
        };
        keys.push(Keyframe {
            time: time as f32,
            value,
            hold: flag(key.get("h")),
        });
    }
    if keys.is_empty() {
        return Err(LoaderError::parse("animated property has no usable keyframes"));
    }
    keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    Ok(Animated::Keyframes(keys))
}

/// Per-document property conversion state: collected slots and the expression flag.
pub(crate) struct PropertyCx<'a> {
    engine: Option<&'a ExpressionEngine>,
    defaults: Option<&'a Map<String, Value>>,
    pub(crate) slots: Vec<Slot>,
    pub(crate) expressions: bool,
}

impl<'a> PropertyCx<'a> {
    pub(crate) fn new(
        engine: Option<&'a ExpressionEngine>,
        defaults: Option<&'a Map<String, Value>>,
    ) -> Self {
        Self {
            engine,
            defaults,
            slots: Vec::new(),
            expressions: false,
        }
    }

    pub(crate) fn property<T: Clone>(
        &mut self,
        v: &Value,
        conv: Convert<T>,
        wrap: fn(Animated<T>) -> SlotValue,
    ) -> LoaderResult<Property<T>> {
        let sid = v.get("sid").and_then(Value::as_str).map(str::to_owned);

        // A slotted property may omit its own value and rely on the document's `slots` section.
        let value = match (&sid, v.get("k")) {
            (Some(sid), None) => {
                let body = self
                    .defaults
                    .and_then(|d| d.get(sid))
                    .and_then(|s| s.get("p"))
                    .ok_or_else(|| LoaderError::parse(format!("slot `{sid}` has no value")))?;
                animated(body, conv)?
            }
            _ => animated(v, conv)?,
        };

        if let Some(sid) = &sid
            && !self.slots.iter().any(|s| s.sid() == sid)
        {
            self.slots.push(Slot::new(sid.clone(), wrap(value.clone())));
        }

        let ix = v
            .get("ix")
            .and_then(Value::as_u64)
            .and_then(|ix| u32::try_from(ix).ok());

        let expression = match (self.engine, v.get("x").and_then(Value::as_str)) {
            (Some(engine), Some(src)) => match engine.compile(src) {
                Ok(expr) => {
                    self.expressions = true;
                    Some(expr)
                }
                Err(err) => {
                    tracing::warn!(%err, src, "expression ignored");
                    None
                }
            },
            _ => None,
        };

        Ok(Property {
            value,
            sid,
            ix,
            expression,
        })
    }

    /// Like [`Self::property`] but a missing or unsupported value yields `None`.
    pub(crate) fn optional<T: Clone>(
        &mut self,
        v: Option<&Value>,
        conv: Convert<T>,
        wrap: fn(Animated<T>) -> SlotValue,
        what: &str,
    ) -> Option<Property<T>> {
        let v = v?;
        match self.property(v, conv, wrap) {
            Ok(p) => Some(p),
            Err(err) => {
                tracing::warn!(%err, property = what, "property ignored");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parser/value.rs"]
mod tests;
