//! Asynchronous loader for Lottie animation documents.
//!
//! A [`Loader`] opens a document, parses and builds it on a worker (or inline when the
//! [`TaskScheduler`] has no workers) and then evaluates it frame by frame:
//!
//! - seek with [`Loader::frame`], blend two frames with [`Loader::tween`]
//! - restrict playback with [`Loader::segment`] / [`Loader::segment_by_marker`]
//! - override slot values with [`Loader::override_slots`]
//! - read the evaluated [`Scene`] with [`Loader::paint`]
//!
//! Scene construction is pluggable through [`SceneBuilder`]; [`LottieBuilder`] is the default.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Scene builders.
pub mod builder;
/// Property expressions.
pub mod expression;
/// The loader itself.
pub mod loader;
/// Parsed document model and evaluated scene.
pub mod model;
/// Document and slot payload parsing.
pub mod parser;
/// Header-only document probing.
pub mod prober;
/// Task dispatch.
pub mod scheduler;

pub use crate::foundation::core::{
    Affine, FLOAT_EPSILON, FRAME_SKIP_EPSILON, FRAME_SNAP_SCALE, Point, Rect, Rgba, Vec2,
};
pub use crate::foundation::error::{LoaderError, LoaderResult};

pub use crate::builder::{LottieBuilder, SceneBuilder};
pub use crate::expression::{Expression, ExpressionEngine};
pub use crate::loader::Loader;
pub use crate::model::document::{Document, Layer, LayerKind, Marker};
pub use crate::model::scene::{ClipRegion, Scene, SceneNode};
pub use crate::model::slot::{Slot, SlotKind, SlotValue};
pub use crate::parser::{DocumentParser, ParsedDocument, SlotParser};
pub use crate::prober::{HeaderInfo, probe};
pub use crate::scheduler::{SchedulerOpts, TaskHandle, TaskScheduler};
