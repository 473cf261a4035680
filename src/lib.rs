//! # svg2topo
//!
//! Converts SVG map outlines into TopoJSON.
//!
//! Each `<path>` in the source document becomes one map region. Its outline
//! is read as a polyline in canvas pixels, then every vertex is projected to
//! longitude/latitude by treating the canvas as a spherical Mercator map.
//!
//! ## Architecture
//!
//! ```text
//! SVG text
//!       ↓
//!   [svg]        — canvas size + path `d` / `id` attributes
//!       ↓
//!   [path]       — path data → absolute points
//!       ↓
//!   [projection] — points → longitude / latitude
//!       ↓
//!   [quantize]   — optional integer delta encoding
//!       ↓
//!   [topology]   — TopoJSON document
//! ```

pub mod error;
pub mod options;
pub mod path;
pub mod projection;
pub mod quantize;
pub mod svg;
pub mod topology;

use std::collections::BTreeMap;

use tracing::{debug, info};

pub use error::ConvertError;
pub use options::{ConvertOptions, Extent};
use projection::MercatorProjector;
use svg::SvgDocument;
use topology::{Arcs, Geometry, GeometryCollection, Properties, Topology};

/// Convert an already-read SVG document to a topology.
///
/// Paths are converted in document order; arc `i` belongs to geometry `i`.
/// The first path that fails to parse aborts the whole conversion.
pub fn convert(document: &SvgDocument, options: &ConvertOptions) -> Result<Topology, ConvertError> {
    let (width, height) = document
        .canvas
        .extent(options.extent)
        .ok_or(ConvertError::MissingCanvas)?;
    let projector = MercatorProjector::new(width, height)?;

    let quantize_scale = match options.quantize {
        Some(scale) if !quantize::valid_scale(scale) => {
            return Err(ConvertError::InvalidQuantization(scale))
        }
        other => other,
    };

    let mut arcs = Vec::with_capacity(document.paths.len());
    let mut geometries = Vec::with_capacity(document.paths.len());

    for (index, svg_path) in document.paths.iter().enumerate() {
        let points = path::parse(&svg_path.d).map_err(|source| ConvertError::MalformedPath {
            index,
            id: svg_path.id.clone(),
            source,
        })?;
        debug!(index, id = ?svg_path.id, points = points.len(), "parsed path");

        arcs.push(
            points
                .into_iter()
                .map(|p| projector.project(p).into())
                .collect::<Vec<[f64; 2]>>(),
        );
        let id = svg_path.id.as_deref().unwrap_or_default();
        geometries.push(Geometry::single_ring(index, Properties::from_id(id)));
    }

    let (arcs, transform) = match quantize_scale {
        Some(scale) => {
            let quantized = arcs
                .iter()
                .enumerate()
                .map(|(index, arc)| {
                    quantize::quantize_arc(arc, scale)
                        .ok_or(ConvertError::QuantizationOverflow { index, scale })
                })
                .collect::<Result<Vec<_>, _>>()?;
            (Arcs::Quantized(quantized), Some(quantize::transform_for(scale)))
        }
        None => (Arcs::Projected(arcs), None),
    };

    info!(
        paths = geometries.len(),
        width,
        height,
        quantized = transform.is_some(),
        "converted document"
    );

    let mut objects = BTreeMap::new();
    objects.insert(options.object_name.clone(), GeometryCollection { geometries });
    Ok(Topology {
        objects,
        arcs,
        transform,
    })
}

/// Read SVG source text and convert it to a topology.
pub fn convert_str(svg: &str, options: &ConvertOptions) -> Result<Topology, ConvertError> {
    let document = svg::read_document(svg)?;
    convert(&document, options)
}
