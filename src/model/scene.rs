use crate::foundation::core::{Affine, Rect, Rgba};

/// Root of the renderable scene produced by a scene builder.
///
/// `transform` and `clip` belong to the caller (see [`Scene::scale_to`]); builders only
/// rewrite `nodes` and `frame`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    /// Outer transform applied on top of every node.
    pub transform: Affine,
    /// Clip region, normally the document canvas.
    pub clip: Option<ClipRegion>,
    /// Visible nodes in painter's order (bottom first).
    pub nodes: Vec<SceneNode>,
    /// Document frame the nodes were evaluated at.
    pub frame: f32,
}

/// Rectangular clip with its own transform.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipRegion {
    /// Clip rectangle in document space.
    pub rect: Rect,
    /// Transform applied to `rect`.
    pub transform: Affine,
}

/// One evaluated layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneNode {
    /// Layer name.
    pub name: String,
    /// Fully resolved layer transform.
    pub transform: Affine,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Fill colour, if the layer paints one.
    pub fill: Option<Rgba>,
    /// Text content, for text layers.
    pub text: Option<String>,
}

impl Scene {
    /// Empty scene clipped to a `width` x `height` canvas.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            transform: Affine::IDENTITY,
            clip: Some(ClipRegion {
                rect: Rect::new(0.0, 0.0, width, height),
                transform: Affine::IDENTITY,
            }),
            nodes: Vec::new(),
            frame: 0.0,
        }
    }

    /// Scale from `native` size to `target` size.
    ///
    /// The transform is replaced, not accumulated, and the clip follows it so clipping geometry
    /// stays aligned with the content.
    pub fn scale_to(&mut self, native: (f64, f64), target: (f64, f64)) {
        let sx = target.0 / native.0;
        let sy = target.1 / native.1;
        let m = Affine::scale_non_uniform(sx, sy);
        self.transform = m;
        if let Some(clip) = self.clip.as_mut() {
            clip.transform = m;
        }
    }

    /// Find a node by layer name.
    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/scene.rs"]
mod tests;
