use serde_json::{Map, Value};

/// Top-level document fields the loader understands; everything else is ignored.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawDocument {
    #[serde(default)]
    pub v: Option<String>,
    #[serde(default)]
    pub nm: Option<String>,
    pub fr: f32,
    #[serde(default)]
    pub ip: f32,
    pub op: f32,
    #[serde(default)]
    pub w: f32,
    #[serde(default)]
    pub h: f32,
    #[serde(default)]
    pub markers: Vec<RawMarker>,
    #[serde(default)]
    pub layers: Vec<RawLayer>,
    #[serde(default)]
    pub slots: Option<Map<String, Value>>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawMarker {
    #[serde(default)]
    pub cm: String,
    #[serde(default)]
    pub tm: f32,
    #[serde(default)]
    pub dr: f32,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawLayer {
    #[serde(default)]
    pub nm: String,
    #[serde(default)]
    pub ind: Option<u32>,
    #[serde(default)]
    pub ty: u32,
    #[serde(default)]
    pub ip: Option<f32>,
    #[serde(default)]
    pub op: Option<f32>,
    #[serde(default)]
    pub st: f32,
    #[serde(default)]
    pub hd: bool,
    #[serde(default)]
    pub ks: Option<RawTransform>,
    /// Solid colour, `#rrggbb`.
    #[serde(default)]
    pub sc: Option<String>,
    #[serde(default)]
    pub shapes: Vec<Value>,
    /// Text data; only `t.d` is read.
    #[serde(default)]
    pub t: Option<Value>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct RawTransform {
    #[serde(default)]
    pub a: Option<Value>,
    #[serde(default)]
    pub p: Option<Value>,
    #[serde(default)]
    pub s: Option<Value>,
    #[serde(default)]
    pub r: Option<Value>,
    #[serde(default)]
    pub o: Option<Value>,
}
