//! # TopoJSON Model
//!
//! Serializable output document. The shape follows the TopoJSON
//! format closely enough for mapping libraries to load it: a
//! `Topology` with one named `GeometryCollection`, one geometry per source
//! path, and a shared `arcs` array that geometries reference by index.

use std::collections::BTreeMap;

use serde::Serialize;

/// A finished topology document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Topology")]
pub struct Topology {
    pub objects: BTreeMap<String, GeometryCollection>,
    pub arcs: Arcs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "GeometryCollection")]
pub struct GeometryCollection {
    pub geometries: Vec<Geometry>,
}

/// One map region. `arcs` nests polygon -> ring -> arc index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "MultiPolygon")]
pub struct Geometry {
    pub arcs: Vec<Vec<Vec<usize>>>,
    pub properties: Properties,
}

impl Geometry {
    /// A single-ring polygon made of the arc at `arc_index`.
    pub fn single_ring(arc_index: usize, properties: Properties) -> Self {
        Geometry {
            arcs: vec![vec![vec![arc_index]]],
            properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Properties {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    #[serde(rename = "ISO")]
    pub iso: String,
}

impl Properties {
    /// Placeholder name and ISO code derived from the path id.
    pub fn from_id(id: &str) -> Self {
        Properties {
            id: id.to_string(),
            name: format!("name_{}", id),
            iso: format!("iso_{}", id),
        }
    }
}

/// Arc coordinates: plain longitude/latitude pairs, or integer deltas when
/// the topology carries a [`Transform`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Arcs {
    Projected(Vec<Vec<[f64; 2]>>),
    Quantized(Vec<Vec<[i64; 2]>>),
}

impl Arcs {
    pub fn len(&self) -> usize {
        match self {
            Arcs::Projected(arcs) => arcs.len(),
            Arcs::Quantized(arcs) => arcs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maps quantized positions back to coordinates:
/// `coord = position * scale + translate` (after undoing delta encoding).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Topology {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
