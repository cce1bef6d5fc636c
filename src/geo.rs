//! Geospatial coordinates as sortable 64-bit keys.
//!
//! A coordinate pair is scaled onto a 32-bit grid over its domain and the
//! two grid cells are interleaved into one key, so that sorting keys
//! roughly preserves spatial locality. Two domains are supported: raw
//! geographic degrees and Web Mercator meters.

use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

use crate::morton::{deinterleave64, interleave64};

/// Half the equatorial circumference of the spheroid used by the Web
/// Mercator projection (EPSG 3785, major axis 6378137 m).
pub const HALF_CIRCUMFERENCE: f64 = PI * 6378137.0;

/// The projection is unusable beyond this latitude; `y` diverges as the
/// poles are approached.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.0;

// Projected y at 85°N. For the Google/Bing projection:
//   Xmin: -20037508.342789244  - 180°W
//   Ymin: -19971868.88040853   - 85°S
//   Xmax: 20037508.342789244   - 180°E
//   Ymax: 19971868.88040853    - 85°N
const MERCATOR_MAX_Y: f64 = 19971868.88040853;

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("latitude {0} is outside the Web Mercator band [-85, 85]")]
    LatitudeOutOfBand(f64),
    #[error("coordinate {0} is not finite")]
    NotFinite(f64),
}

/// Axis bounds of a coordinate system, selected at call time. Values
/// outside the bounds clamp to them when encoding; they never wrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Raw geographic degrees.
pub const GEOGRAPHIC: Domain = Domain {
    min_x: -180.0,
    max_x: 180.0,
    min_y: -90.0,
    max_y: 90.0,
};

/// Web Mercator meters.
pub const WEB_MERCATOR: Domain = Domain {
    min_x: -HALF_CIRCUMFERENCE,
    max_x: HALF_CIRCUMFERENCE,
    min_y: -MERCATOR_MAX_Y,
    max_y: MERCATOR_MAX_Y,
};

impl Domain {
    /// Combines a coordinate pair into a single 64-bit key. The x axis
    /// occupies the even bits, y the odd bits.
    pub fn encode(&self, x: f64, y: f64) -> u64 {
        interleave64(
            normalize(x, self.min_x, self.max_x),
            normalize(y, self.min_y, self.max_y),
        )
    }

    /// Recovers the coordinate pair from a key, up to the grid
    /// resolution of each axis.
    pub fn decode(&self, key: u64) -> (f64, f64) {
        let (x_cell, y_cell) = deinterleave64(key);
        (
            denormalize(x_cell, self.min_x, self.max_x),
            denormalize(y_cell, self.min_y, self.max_y),
        )
    }
}

/// Maps `value` onto the 32-bit grid over `[min, max]`. Out-of-domain
/// values clamp to the nearest edge.
pub fn normalize(value: f64, min: f64, max: f64) -> u32 {
    let proportion = (value - min) / (max - min);
    if proportion < 0.0 || proportion > 1.0 {
        debug!("{} is outside [{}, {}], clamping", value, min, max);
    }
    let proportion = proportion.max(0.0).min(1.0);
    (proportion * u32::MAX as f64).round() as u32
}

/// Inverse of `normalize`, up to the grid resolution `(max - min) / 2^32`.
pub fn denormalize(cell: u32, min: f64, max: f64) -> f64 {
    min + (cell as f64 / u32::MAX as f64) * (max - min)
}

/// A geographic position in degrees. Longitude is the x axis, latitude
/// the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn x(&self) -> f64 {
        self.lon
    }

    pub fn y(&self) -> f64 {
        self.lat
    }

    /// The 64-bit key of this position on the geographic grid.
    pub fn interleaved(&self) -> u64 {
        GEOGRAPHIC.encode(self.lon, self.lat)
    }

    /// Reads a position back from a key, up to grid resolution.
    pub fn deinterleave(key: u64) -> Self {
        let (lon, lat) = GEOGRAPHIC.decode(key);
        Self { lon, lat }
    }

    /// Projects this position onto the Web Mercator plane.
    pub fn project(&self) -> Result<Mercator, ProjectionError> {
        if !self.lon.is_finite() {
            return Err(ProjectionError::NotFinite(self.lon));
        }
        if !self.lat.is_finite() {
            return Err(ProjectionError::NotFinite(self.lat));
        }
        if self.lat.abs() > MAX_MERCATOR_LATITUDE {
            return Err(ProjectionError::LatitudeOutOfBand(self.lat));
        }
        let x = self.lon * HALF_CIRCUMFERENCE / 180.0;
        let y = ((90.0 + self.lat) * PI / 360.0).tan().ln() / (PI / 180.0)
            * (HALF_CIRCUMFERENCE / 180.0);
        Ok(Mercator { x, y })
    }
}

/// A position on the Web Mercator plane, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mercator {
    pub x: f64,
    pub y: f64,
}

impl Mercator {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The 64-bit key of this position on the projected grid.
    pub fn interleaved(&self) -> u64 {
        WEB_MERCATOR.encode(self.x, self.y)
    }

    /// Reads a position back from a key, up to grid resolution.
    pub fn deinterleave(key: u64) -> Self {
        let (x, y) = WEB_MERCATOR.decode(key);
        Self { x, y }
    }

    /// Inverse projection back to degrees. Fails if the point lies
    /// beyond the ±85° band.
    pub fn deproject(&self) -> Result<LonLat, ProjectionError> {
        if !self.x.is_finite() {
            return Err(ProjectionError::NotFinite(self.x));
        }
        if !self.y.is_finite() {
            return Err(ProjectionError::NotFinite(self.y));
        }
        let lon = self.x / HALF_CIRCUMFERENCE * 180.0;
        let lat =
            180.0 / PI * (2.0 * (self.y / HALF_CIRCUMFERENCE * PI).exp().atan() - PI / 2.0);
        if lat.abs() > MAX_MERCATOR_LATITUDE {
            return Err(ProjectionError::LatitudeOutOfBand(lat));
        }
        Ok(LonLat { lon, lat })
    }
}
