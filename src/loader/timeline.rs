use crate::foundation::core::{FRAME_SKIP_EPSILON, FRAME_SNAP_SCALE, is_equal, is_zero};
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::loader::Loader;

impl Loader {
    /// Map a segment-relative frame to a document-local one, snapped to the frame grid.
    ///
    /// The snapped value is scaled back by multiplying with the grid step rather than dividing,
    /// so it can sit one ulp away from the nearest decimal.
    pub(crate) fn shorten(&self, no: f32) -> f32 {
        ((no + self.segment_begin) * FRAME_SNAP_SCALE).round_ties_even() * FRAME_SNAP_SCALE.recip()
    }

    /// Seek to frame `no` of the current segment.
    ///
    /// Returns `false` when the request is within [`FRAME_SKIP_EPSILON`] of the last one (and no
    /// tween is pending), or when there is nothing to evaluate.
    #[tracing::instrument(skip(self))]
    pub fn frame(&mut self, no: f32) -> bool {
        let no = self.shorten(no);
        if !self.tweening && (self.frame_no - no).abs() <= FRAME_SKIP_EPSILON {
            return false;
        }
        if self.read().is_err() {
            return false;
        }

        let Some(task) = self.done() else {
            return false;
        };
        task.builder.off_tween();
        // Must be cleared on the caller thread, before dispatch.
        if let Some(doc) = task.doc.as_mut() {
            doc.clear();
        }
        self.tweening = false;
        self.frame_no = no;
        self.dispatch();
        true
    }

    /// Evaluate a blend of frames `from` and `to` at `progress`.
    ///
    /// A `progress` of (nearly) `0` or `1` is a plain seek to `from` or `to`.
    #[tracing::instrument(skip(self))]
    pub fn tween(&mut self, from: f32, to: f32, progress: f32) -> bool {
        if is_zero(progress) {
            return self.frame(from);
        }
        if is_equal(progress, 1.0) {
            return self.frame(to);
        }
        if self.read().is_err() {
            return false;
        }

        let (from, to) = (self.shorten(from), self.shorten(to));
        let Some(task) = self.done() else {
            return false;
        };
        task.builder.on_tween(to, progress);
        if let Some(doc) = task.doc.as_mut() {
            doc.clear();
        }
        self.tweening = true;
        self.frame_no = from;
        self.dispatch();
        true
    }

    /// Wait for in-flight work and run a pending rebuild (slot or variable changes) inline.
    pub fn sync(&mut self) {
        let Some(task) = self.done() else {
            return;
        };
        if task.rebuild {
            task.run();
        }
    }

    /// Restrict playback to `[begin, end]`, clamped to the document's frame range.
    pub fn segment(&mut self, begin: f32, end: f32) -> LoaderResult<()> {
        let begin = begin.max(0.0);
        let end = end.min(self.frame_cnt);
        if begin > end {
            return Err(LoaderError::invalid_arguments(format!(
                "segment begin {begin} is past its end {end}"
            )));
        }
        self.segment_begin = begin;
        self.segment_end = end;
        Ok(())
    }

    /// Frame range `(time, time + duration)` of the marker called `name`.
    pub fn segment_by_marker(&mut self, name: &str) -> Option<(f32, f32)> {
        let doc = self.document()?;
        doc.marker(name).map(|m| (m.time, m.time + m.duration))
    }

    /// Segment duration in seconds.
    pub fn duration(&self) -> f32 {
        if is_zero(self.frame_rate) {
            return 0.0;
        }
        (self.segment_end - self.segment_begin) / self.frame_rate
    }

    /// Frames in the current segment.
    pub fn total_frame(&self) -> f32 {
        self.segment_end - self.segment_begin
    }

    /// First frame of the current segment.
    pub fn start_frame(&self) -> f32 {
        self.segment_begin
    }

    /// Current frame, relative to the segment start.
    pub fn cur_frame(&self) -> f32 {
        self.frame_no - self.segment_begin
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/timeline.rs"]
mod tests;
