//! In-memory document model and the scene graph produced from it.

/// Documents, layers and markers.
pub mod document;
/// Animated properties and keyframe sampling.
pub mod property;
/// Evaluated scene graph.
pub mod scene;
/// Overridable slot values.
pub mod slot;
