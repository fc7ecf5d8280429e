use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::builder::SceneBuilder;
use crate::loader::slots;
use crate::model::document::Document;
use crate::parser::{DocumentParser, ParsedDocument};

/// Raw document text held until the first successful parse.
pub(crate) enum Content {
    /// Private copy, released after the first build.
    Owned(Vec<u8>),
    /// Caller's buffer, kept for the loader's lifetime.
    Shared(Arc<[u8]>),
    Released,
}

impl Content {
    pub(crate) fn bytes(&self) -> &[u8] {
        match self {
            Self::Owned(v) => &v[..],
            Self::Shared(v) => &v[..],
            Self::Released => &[],
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    fn release(&mut self) {
        if let Self::Owned(v) = self {
            tracing::debug!(bytes = v.len(), "document content released");
            *self = Self::Released;
        }
    }
}

/// Header of a parsed document, published to the caller under a lock.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DocumentInfo {
    pub width: f32,
    pub height: f32,
    pub frame_rate: f32,
    pub frame_count: f32,
}

impl From<&Document> for DocumentInfo {
    fn from(doc: &Document) -> Self {
        Self {
            width: doc.width,
            height: doc.height,
            frame_rate: doc.frame_rate,
            frame_count: doc.frame_count(),
        }
    }
}

pub(crate) type SharedInfo = Arc<Mutex<Option<Arc<DocumentInfo>>>>;

/// Mutable loader state that travels to the worker with each job.
pub(crate) struct LoaderTask {
    pub content: Content,
    pub dir_name: PathBuf,
    pub doc: Option<Document>,
    pub builder: Box<dyn SceneBuilder>,
    /// Document-local frame the next update evaluates.
    pub frame_no: f32,
    pub rebuild: bool,
    pub overridden: bool,
    info: SharedInfo,
}

impl LoaderTask {
    pub(crate) fn new(builder: Box<dyn SceneBuilder>, info: SharedInfo) -> Self {
        Self {
            content: Content::Released,
            dir_name: PathBuf::new(),
            doc: None,
            builder,
            frame_no: 0.0,
            rebuild: false,
            overridden: false,
            info,
        }
    }

    /// Parse and build on the first run, update to `frame_no` afterwards.
    pub(crate) fn run(&mut self) {
        match self.doc.as_mut() {
            Some(doc) => {
                if let Err(err) = self.builder.update(doc, self.frame_no) {
                    tracing::warn!(%err, frame_no = self.frame_no, "scene update failed");
                }
            }
            None => self.first_build(),
        }
        self.rebuild = false;
    }

    fn first_build(&mut self) {
        let parsed = DocumentParser::new(
            self.content.bytes(),
            &self.dir_name,
            self.builder.expressions(),
        )
        .parse();
        let ParsedDocument {
            mut document,
            default_slots,
        } = match parsed {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(%err, "failed to parse document");
                return;
            }
        };

        *self.info.lock() = Some(Arc::new(DocumentInfo::from(&document)));

        if let Some(mut defaults) = default_slots {
            slots::apply(&mut document, &mut defaults, true);
        }
        if let Err(err) = self.builder.build(&mut document) {
            tracing::warn!(%err, "initial scene build failed");
        }
        self.doc = Some(document);
        self.content.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/task.rs"]
mod tests;
