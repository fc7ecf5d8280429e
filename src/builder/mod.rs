//! Document → [`Scene`](crate::model::scene::Scene) evaluation.

mod lottie;

pub use lottie::LottieBuilder;

use crate::expression::ExpressionEngine;
use crate::foundation::error::LoaderResult;
use crate::model::document::Document;

/// Turns a parsed document into its root scene for a given frame.
///
/// The loader moves its builder onto the worker thread together with the document, hence `Send`.
/// Frame numbers passed in are document-local (`0` is the document's in-point).
pub trait SceneBuilder: Send {
    /// Initial scene construction, right after the document was parsed.
    fn build(&mut self, doc: &mut Document) -> LoaderResult<()>;

    /// Re-evaluate the scene at `frame_no`, blending towards the tween target when one is set.
    fn update(&mut self, doc: &mut Document, frame_no: f32) -> LoaderResult<()>;

    /// Return `true` while a tween target is configured.
    fn tweening(&self) -> bool;

    /// Blend the next updates towards `to` at `progress` in `(0, 1)`.
    fn on_tween(&mut self, to: f32, progress: f32);

    /// Leave tween mode.
    fn off_tween(&mut self);

    /// Expression engine handed to the parser; `None` disables expressions.
    fn expressions(&self) -> Option<&ExpressionEngine>;
}
