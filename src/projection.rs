//! # Mercator Projection
//!
//! Reinterprets planar canvas coordinates as longitude/latitude. The canvas
//! is treated as a square-ish spherical Mercator map: X spans -180..180
//! degrees and Y spans PI..-PI in projected units, which the inverse
//! Mercator (Gudermannian) function turns into latitude.

use std::f64::consts::PI;

use thiserror::Error;

use crate::path::Point;

/// A projected coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl From<LonLat> for [f64; 2] {
    fn from(p: LonLat) -> Self {
        [p.lon, p.lat]
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("canvas of {width} x {height} cannot be projected; both sides must be positive")]
    DegenerateCanvas { width: f64, height: f64 },
}

/// Linearly map `val` from `[cur_min, cur_max]` onto `[new_min, new_max]`.
pub fn remap(val: f64, cur_min: f64, cur_max: f64, new_min: f64, new_max: f64) -> f64 {
    ((val - cur_min) * (new_max - new_min)) / (cur_max - cur_min) + new_min
}

/// Latitude in degrees for a projected Mercator Y in radians.
pub fn gudermannian(y_radians: f64) -> f64 {
    y_radians.sinh().atan().to_degrees()
}

/// Inverse Mercator projection for one canvas size.
///
/// Construction validates the canvas once, so projecting individual points
/// cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct MercatorProjector {
    width: f64,
    height: f64,
}

impl MercatorProjector {
    pub fn new(width: f64, height: f64) -> Result<Self, ProjectionError> {
        let valid = |side: f64| side.is_finite() && side > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ProjectionError::DegenerateCanvas { width, height });
        }
        Ok(MercatorProjector { width, height })
    }

    pub fn longitude(&self, x: f64) -> f64 {
        remap(x, 0.0, self.width, -180.0, 180.0)
    }

    pub fn latitude(&self, y: f64) -> f64 {
        gudermannian(remap(y, 0.0, self.height, PI, -PI))
    }

    pub fn project(&self, point: Point) -> LonLat {
        LonLat {
            lon: self.longitude(point.x),
            lat: self.latitude(point.y),
        }
    }
}

/// Project a single point onto a `canvas_width` x `canvas_height` canvas.
pub fn project(point: Point, canvas_width: f64, canvas_height: f64) -> Result<LonLat, ProjectionError> {
    Ok(MercatorProjector::new(canvas_width, canvas_height)?.project(point))
}
