//! Asynchronous document loader.
//!
//! A [`Loader`] owns one document and drives it through a [`TaskScheduler`]: the first job parses
//! and builds, every later job re-evaluates the scene at the requested frame. At most one job is in
//! flight per loader; every call that touches the document waits for it first.
//!
//! ```no_run
//! use lottie_loader::{Loader, SchedulerOpts, TaskScheduler};
//!
//! # fn main() -> lottie_loader::LoaderResult<()> {
//! let scheduler = TaskScheduler::new(SchedulerOpts::default())?;
//! let mut loader = Loader::new(scheduler);
//! loader.open_path("anim.json")?;
//! loader.read()?;
//! loader.frame(12.0);
//! if let Some(scene) = loader.paint() {
//!     println!("{} nodes", scene.nodes.len());
//! }
//! # Ok(())
//! # }
//! ```

mod slots;
mod task;
mod timeline;

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::builder::{LottieBuilder, SceneBuilder};
use crate::foundation::core::is_zero;
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::model::document::Document;
use crate::model::scene::Scene;
use crate::prober;
use crate::scheduler::{TaskHandle, TaskScheduler};
use task::{Content, DocumentInfo, LoaderTask, SharedInfo};

enum TaskSlot {
    Idle(Box<LoaderTask>),
    Running(TaskHandle<Box<LoaderTask>>),
    /// The task panicked; the loader has no document anymore.
    Lost,
}

/// Loads one animation document and evaluates it frame by frame.
pub struct Loader {
    scheduler: TaskScheduler,
    slot: TaskSlot,
    info: SharedInfo,
    dispatched: bool,
    tweening: bool,
    frame_no: f32,
    segment_begin: f32,
    segment_end: f32,
    frame_cnt: f32,
    frame_rate: f32,
    w: f32,
    h: f32,
}

impl Loader {
    /// Loader using the default [`LottieBuilder`].
    pub fn new(scheduler: TaskScheduler) -> Self {
        Self::with_builder(scheduler, LottieBuilder::new())
    }

    /// Loader using a custom scene builder.
    pub fn with_builder(scheduler: TaskScheduler, builder: impl SceneBuilder + 'static) -> Self {
        let info: SharedInfo = Arc::new(Mutex::new(None));
        let task = LoaderTask::new(Box::new(builder), Arc::clone(&info));
        Self {
            scheduler,
            slot: TaskSlot::Idle(Box::new(task)),
            info,
            dispatched: false,
            tweening: false,
            frame_no: 0.0,
            segment_begin: 0.0,
            segment_end: 0.0,
            frame_cnt: 0.0,
            frame_rate: 0.0,
            w: 0.0,
            h: 0.0,
        }
    }

    /// Open a document from memory. The bytes are copied and released after the first build.
    ///
    /// `rpath` is the directory relative asset references resolve against.
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub fn open(&mut self, data: &[u8], rpath: Option<&Path>) -> LoaderResult<()> {
        self.install(Content::Owned(data.to_vec()), rpath)
    }

    /// Open a document from a shared buffer the loader keeps for its lifetime.
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub fn open_shared(&mut self, data: Arc<[u8]>, rpath: Option<&Path>) -> LoaderResult<()> {
        self.install(Content::Shared(data), rpath)
    }

    /// Open a document file; assets resolve against its directory.
    #[tracing::instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn open_path(&mut self, path: impl AsRef<Path>) -> LoaderResult<()> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.install(Content::Owned(data), Some(dir))
    }

    fn install(&mut self, content: Content, rpath: Option<&Path>) -> LoaderResult<()> {
        if content.is_empty() {
            return Err(LoaderError::invalid_arguments("empty document content"));
        }
        let task = self
            .done()
            .ok_or_else(|| LoaderError::Other(anyhow::anyhow!("loader task was lost")))?;
        if task.doc.is_some() || !task.content.is_empty() {
            return Err(LoaderError::invalid_arguments(
                "loader already holds a document",
            ));
        }
        task.content = content;
        task.dir_name = rpath.map(Path::to_path_buf).unwrap_or_default();

        if let Err(err) = self.header() {
            if let Some(task) = self.done() {
                task.content = Content::Released;
            }
            self.dispatched = false;
            return Err(err);
        }
        Ok(())
    }

    /// Read the header: probe the raw text when a worker will parse later, parse inline
    /// otherwise.
    fn header(&mut self) -> LoaderResult<()> {
        let info = if self.scheduler.threads() > 0 {
            let task = self
                .done()
                .ok_or_else(|| LoaderError::Other(anyhow::anyhow!("loader task was lost")))?;
            let probed = prober::probe(task.content.bytes())
                .ok_or_else(|| LoaderError::parse("not a Lottie document"))?;
            DocumentInfo {
                width: probed.width,
                height: probed.height,
                frame_rate: probed.frame_rate,
                frame_count: probed.frame_count(),
            }
        } else {
            self.dispatch();
            self.done();
            let published = self.info.lock().clone();
            let info = published.ok_or_else(|| LoaderError::parse("not a Lottie document"))?;
            (*info).clone()
        };

        self.w = info.width;
        self.h = info.height;
        self.frame_rate = info.frame_rate;
        self.frame_cnt = info.frame_count;
        self.segment_begin = 0.0;
        self.segment_end = info.frame_count;
        tracing::debug!(
            w = self.w,
            h = self.h,
            frame_rate = self.frame_rate,
            frame_cnt = self.frame_cnt,
            "document header"
        );
        Ok(())
    }

    /// Dispatch the first parse + build unless it already happened.
    #[tracing::instrument(skip(self))]
    pub fn read(&mut self) -> LoaderResult<()> {
        if self.dispatched {
            return Ok(());
        }
        match &self.slot {
            TaskSlot::Idle(task) if !task.content.is_empty() => {}
            _ => return Err(LoaderError::invalid_arguments("no document content to read")),
        }
        self.dispatch();
        Ok(())
    }

    /// Return `true` once the document exists, waiting for in-flight work if needed.
    pub fn ready(&mut self) -> bool {
        if let TaskSlot::Running(handle) = &mut self.slot
            && handle.is_lost()
        {
            self.done();
        }
        if self.info.lock().is_some() {
            return true;
        }
        self.done();
        self.info.lock().is_some()
    }

    /// Wait for in-flight work and hand out the root scene.
    pub fn paint(&mut self) -> Option<&Scene> {
        let doc = self.document()?;
        doc.initiated = true;
        Some(&doc.root)
    }

    /// Number of markers; `0` without a document.
    pub fn markers_cnt(&mut self) -> usize {
        self.document().map_or(0, |d| d.markers.len())
    }

    /// Name of the marker at `index`.
    pub fn marker(&mut self, index: usize) -> Option<&str> {
        let doc = self.document()?;
        doc.markers.get(index).map(|m| m.name.as_str())
    }

    /// Scale the root scene (and its clip) from the native size to `w` x `h`.
    pub fn resize(&mut self, w: f32, h: f32) -> bool {
        let (native_w, native_h) = (self.w, self.h);
        if is_zero(native_w) || is_zero(native_h) {
            return false;
        }
        let Some(doc) = self.document() else {
            return false;
        };
        doc.root.scale_to(
            (f64::from(native_w), f64::from(native_h)),
            (f64::from(w), f64::from(h)),
        );
        true
    }

    /// Assign an expression variable on a layer; applied by the next rebuild.
    ///
    /// Returns `false` without a document, when the document has no expressions, or when no
    /// layer has that name.
    pub fn assign(&mut self, layer: &str, ix: u32, var: &str, value: f64) -> bool {
        let Some(task) = self.done() else {
            return false;
        };
        let Some(doc) = task.doc.as_mut() else {
            return false;
        };
        if !doc.expressions {
            return false;
        }
        let Some(target) = doc.layer_mut(layer) else {
            return false;
        };
        target.assign(ix, var, value);
        task.rebuild = true;
        true
    }

    /// Native document size.
    pub fn size(&self) -> (f32, f32) {
        (self.w, self.h)
    }

    /// Frames per second.
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    /// Wait for the in-flight job, if any, and return the idle task.
    fn done(&mut self) -> Option<&mut LoaderTask> {
        if matches!(self.slot, TaskSlot::Running(_)) {
            self.slot = match std::mem::replace(&mut self.slot, TaskSlot::Lost) {
                TaskSlot::Running(handle) => match handle.wait() {
                    Some(task) => TaskSlot::Idle(task),
                    None => {
                        tracing::warn!("loader task lost; the document is gone");
                        self.info.lock().take();
                        TaskSlot::Lost
                    }
                },
                other => other,
            };
        }
        match &mut self.slot {
            TaskSlot::Idle(task) => Some(&mut **task),
            _ => None,
        }
    }

    fn document(&mut self) -> Option<&mut Document> {
        self.done()?.doc.as_mut()
    }

    /// Submit the task at the current `frame_no`.
    fn dispatch(&mut self) {
        self.done();
        let frame_no = self.frame_no;
        self.slot = match std::mem::replace(&mut self.slot, TaskSlot::Lost) {
            TaskSlot::Idle(mut task) => {
                task.frame_no = frame_no;
                TaskSlot::Running(self.scheduler.spawn(move || {
                    task.run();
                    task
                }))
            }
            other => other,
        };
        self.dispatched = true;
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        self.done();
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("scheduler", &self.scheduler)
            .field("frame_no", &self.frame_no)
            .field("segment", &(self.segment_begin, self.segment_end))
            .field("frame_cnt", &self.frame_cnt)
            .field("frame_rate", &self.frame_rate)
            .field("size", &(self.w, self.h))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/mod.rs"]
mod tests;
