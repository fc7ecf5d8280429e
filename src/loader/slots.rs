use crate::loader::Loader;
use crate::loader::task::LoaderTask;
use crate::model::document::Document;
use crate::parser::SlotParser;

/// Apply every payload entry whose sid names a document slot. Returns `true` if any applied.
pub(crate) fn apply(doc: &mut Document, parser: &mut SlotParser, by_default: bool) -> bool {
    let mut succeed = false;
    while let Some(sid) = parser.next_sid() {
        match doc.slots.iter_mut().find(|s| s.sid() == sid) {
            Some(slot) => succeed |= parser.apply(slot, by_default),
            None => {
                tracing::debug!(sid = %sid, "no slot with this id");
                parser.skip();
            }
        }
    }
    succeed
}

impl Loader {
    /// Override slot values from a JSON payload, or restore the defaults with `None`.
    ///
    /// The change is lazy: the scene is rebuilt on the next [`Loader::sync`] or seek. Returns
    /// `false` without a document, when the document has no slots, when the payload is malformed,
    /// or when nothing in it applied.
    #[tracing::instrument(skip(self, payload), fields(reset = payload.is_none()))]
    pub fn override_slots(&mut self, payload: Option<&str>) -> bool {
        if !self.ready() {
            return false;
        }
        let Some(LoaderTask {
            doc: Some(doc),
            rebuild,
            overridden,
            ..
        }) = self.done()
        else {
            return false;
        };
        if doc.slots.is_empty() {
            return false;
        }

        let Some(payload) = payload else {
            if *overridden {
                doc.slots.iter_mut().for_each(|s| s.reset());
                *overridden = false;
                *rebuild = true;
            }
            return true;
        };

        let mut parser = match SlotParser::parse(payload) {
            Ok(parser) => parser,
            Err(err) => {
                tracing::warn!(%err, "slot payload rejected");
                return false;
            }
        };
        let succeed = apply(doc, &mut parser, false);
        *rebuild |= succeed;
        *overridden |= succeed;
        succeed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/slots.rs"]
mod tests;
