use serde_json::{Map, Value};

use crate::foundation::error::{LoaderError, LoaderResult};
use crate::model::slot::{Slot, SlotKind, SlotValue};
use crate::parser::value::{animated, color, scalar, text, vector};

/// Cursor over a slot override payload.
///
/// The payload is a JSON object mapping slot ids to `{"p": <property>}` bodies:
///
/// ```json
/// {"bg": {"p": {"a": 0, "k": [1, 0, 0, 1]}}, "title": {"p": {"k": [{"t": 0, "s": {"t": "Hi"}}]}}}
/// ```
///
/// Walk it with [`SlotParser::next_sid`]; each returned id must be followed by either
/// [`SlotParser::apply`] or [`SlotParser::skip`].
pub struct SlotParser {
    entries: serde_json::map::IntoIter,
    current: Option<Value>,
}

impl SlotParser {
    /// Parse a payload. The text is copied; the parser never borrows it.
    pub fn parse(payload: &str) -> LoaderResult<Self> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| LoaderError::parse(format!("slot payload: {e}")))?;
        Self::from_value(value)
    }

    /// Wrap an already parsed payload.
    pub fn from_value(value: Value) -> LoaderResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(LoaderError::parse(format!(
                "slot payload must be an object, got `{other}`"
            ))),
        }
    }

    pub(crate) fn from_map(map: Map<String, Value>) -> Self {
        Self {
            entries: map.into_iter(),
            current: None,
        }
    }

    /// Advance to the next slot id in the payload.
    pub fn next_sid(&mut self) -> Option<String> {
        let (sid, body) = self.entries.next()?;
        self.current = Some(body);
        Some(sid)
    }

    /// Apply the current entry to `slot`.
    ///
    /// Returns `false` when the entry is malformed or its value does not fit the slot's kind; the
    /// slot is left untouched in that case.
    pub fn apply(&mut self, slot: &mut Slot, by_default: bool) -> bool {
        let Some(body) = self.current.take() else {
            return false;
        };
        let Some(p) = body.get("p") else {
            tracing::debug!(sid = slot.sid(), "slot entry without `p`");
            return false;
        };
        let value = match slot.kind() {
            SlotKind::Scalar => animated(p, scalar).map(SlotValue::Scalar),
            SlotKind::Vector => animated(p, vector).map(SlotValue::Vector),
            SlotKind::Color => animated(p, color).map(SlotValue::Color),
            SlotKind::Text => animated(p, text).map(SlotValue::Text),
        };
        match value {
            Ok(value) => slot.set(value, by_default),
            Err(err) => {
                tracing::debug!(sid = slot.sid(), %err, "slot value rejected");
                false
            }
        }
    }

    /// Drop the current entry.
    pub fn skip(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parser/slots.rs"]
mod tests;
