//! Error type for whole-document conversion.
//!
//! Conversion is all or nothing: the first failing path aborts the run, and
//! the error says which path it was.

use thiserror::Error;

use crate::path::PathError;
use crate::projection::ProjectionError;
use crate::svg::SvgError;

/// The unified error type returned by [`crate::convert`] and
/// [`crate::convert_str`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The SVG document could not be read.
    #[error("failed to read SVG: {0}")]
    Svg(#[from] SvgError),

    /// A path's `d` attribute could not be parsed.
    #[error("malformed path #{index}{}: {source}", describe_id(.id))]
    MalformedPath {
        index: usize,
        id: Option<String>,
        source: PathError,
    },

    /// Neither `width`/`height` nor `viewBox` give a size to project against.
    #[error("document declares neither width/height nor a viewBox")]
    MissingCanvas,

    #[error(transparent)]
    DegenerateCanvas(#[from] ProjectionError),

    #[error("quantization scale must be positive and at most {max}, got {0}", max = crate::quantize::MAX_SCALE)]
    InvalidQuantization(f64),

    /// A coordinate of arc `index` is too large to quantize at `scale`.
    #[error("arc #{index} cannot be quantized at scale {scale}: coordinate out of range")]
    QuantizationOverflow { index: usize, scale: f64 },
}

fn describe_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" (id {:?})", id),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_path_message_names_path() {
        let err = ConvertError::MalformedPath {
            index: 2,
            id: Some("se".to_string()),
            source: PathError::Empty,
        };
        assert_eq!(
            err.to_string(),
            "malformed path #2 (id \"se\"): path contains no points"
        );

        let err = ConvertError::MalformedPath {
            index: 0,
            id: None,
            source: PathError::Empty,
        };
        assert_eq!(err.to_string(), "malformed path #0: path contains no points");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;
        let err = ConvertError::MalformedPath {
            index: 0,
            id: None,
            source: PathError::Empty,
        };
        assert!(err.source().is_some());
    }
}
