//! # SVG Reader
//!
//! Pulls the handful of things the converter needs out of an SVG document:
//! the root element's `width`, `height` and `viewBox`, and the `d` / `id`
//! attributes of every `<path>` in document order. Everything else (styles,
//! groups, transforms, other shapes) is ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::options::Extent;

/// A parsed SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Canvas attributes from the root `<svg>` element. Any of them may be
/// absent in the source document.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Canvas {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub view_box: Option<ViewBox>,
}

impl Canvas {
    /// Width and height to project against. The preferred source is tried
    /// first; the other one fills in when it is missing.
    pub fn extent(&self, preferred: Extent) -> Option<(f64, f64)> {
        let declared = self.width.zip(self.height);
        let view_box = self.view_box.map(|vb| (vb.width, vb.height));
        match preferred {
            Extent::Document => declared.or(view_box),
            Extent::ViewBox => view_box.or(declared),
        }
    }
}

/// One `<path>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub id: Option<String>,
    pub d: String,
}

/// The parts of an SVG document the converter consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub canvas: Canvas,
    pub paths: Vec<SvgPath>,
}

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document has no <svg> root element")]
    MissingRoot,

    #[error("expected <svg> as the root element, found <{0}>")]
    UnexpectedRoot(String),

    #[error("no <path> element found")]
    NoPaths,

    #[error("invalid {name} attribute {value:?}")]
    InvalidAttribute { name: &'static str, value: String },
}

/// Parse a viewBox string like "0 0 100 100" (commas are accepted as
/// separators too).
pub fn parse_view_box(s: &str) -> Option<ViewBox> {
    let parts = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;
    match parts.as_slice() {
        &[min_x, min_y, width, height] => Some(ViewBox {
            min_x,
            min_y,
            width,
            height,
        }),
        _ => None,
    }
}

/// Parse a length attribute such as `800` or `800px`.
pub fn parse_length(s: &str) -> Option<f64> {
    let s = s.trim();
    s.strip_suffix("px").unwrap_or(s).trim().parse::<f64>().ok()
}

/// Read the canvas and paths out of SVG source text.
pub fn read_document(content: &str) -> Result<SvgDocument, SvgError> {
    let mut reader = Reader::from_str(content);
    let mut canvas: Option<Canvas> = None;
    let mut paths = Vec::new();

    let mut buf = Vec::new();

    loop {
        let element = match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => e,
            Event::Eof => break,
            _ => {
                buf.clear();
                continue;
            }
        };
        let tag_name = String::from_utf8_lossy(element.local_name().as_ref()).to_string();

        match canvas {
            None if tag_name == "svg" => canvas = Some(read_canvas(&element)?),
            None => return Err(SvgError::UnexpectedRoot(tag_name)),
            Some(_) if tag_name == "path" => paths.push(SvgPath {
                id: get_attr(&element, "id")?,
                d: get_attr(&element, "d")?.unwrap_or_default(),
            }),
            Some(_) => {}
        }
        buf.clear();
    }

    let canvas = canvas.ok_or(SvgError::MissingRoot)?;
    if paths.is_empty() {
        return Err(SvgError::NoPaths);
    }
    Ok(SvgDocument { canvas, paths })
}

fn read_canvas(e: &BytesStart<'_>) -> Result<Canvas, SvgError> {
    let width = get_attr(e, "width")?
        .map(|v| parse_length(&v).ok_or(SvgError::InvalidAttribute { name: "width", value: v }))
        .transpose()?;
    let height = get_attr(e, "height")?
        .map(|v| parse_length(&v).ok_or(SvgError::InvalidAttribute { name: "height", value: v }))
        .transpose()?;
    let view_box = get_attr(e, "viewBox")?
        .map(|v| parse_view_box(&v).ok_or(SvgError::InvalidAttribute { name: "viewBox", value: v }))
        .transpose()?;
    Ok(Canvas {
        width,
        height,
        view_box,
    })
}

/// Helper to get an unescaped attribute value from a quick-xml BytesStart.
fn get_attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, SvgError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
