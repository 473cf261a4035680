//! Conversion options.
//!
//! Options can be built in code, or deserialized from a JSON file whose keys
//! are camelCase. Every field has a default, so `{}` is a valid options file.

use serde::{Deserialize, Serialize};

/// Which canvas size points are projected against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Extent {
    /// The root element's `width` / `height` attributes.
    #[default]
    Document,
    /// The width and height of the root element's `viewBox`.
    ViewBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Name of the geometry collection under `objects`.
    pub object_name: String,

    pub extent: Extent,

    /// Quantize and delta-encode arcs with this scale factor (e.g. 5000).
    /// Off when `None`.
    pub quantize: Option<f64>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            object_name: "map".to_string(),
            extent: Extent::Document,
            quantize: None,
        }
    }
}

impl ConvertOptions {
    /// Load options from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
