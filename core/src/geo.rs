// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Mean Earth radius in metres (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A latitude/longitude pair in decimal degrees.
///
/// Deserializes from either `{ "latitude": .., "longitude": .. }` or a
/// `"LAT,LON"` string, validating the ranges in both cases.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "CoordinateRepr")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside the valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `latitude` is not in `[-90, 90]` or
    /// `longitude` is not in `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::invalid(
                "coordinate",
                format!("latitude {latitude} out of range [-90, 90]"),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::invalid(
                "coordinate",
                format!("longitude {longitude} out of range [-180, 180]"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in metres.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance_meters(self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Parses `"LAT,LON"`, whitespace around either number is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| Error::invalid("coordinate", format!("expected LAT,LON, got {s:?}")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| Error::invalid("coordinate", format!("{v:?}: {e}")))
        };
        Coordinate::new(parse(lat)?, parse(lon)?)
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CoordinateRepr {
    Text(String),
    Pair { latitude: f64, longitude: f64 },
}

impl TryFrom<CoordinateRepr> for Coordinate {
    type Error = Error;

    fn try_from(repr: CoordinateRepr) -> Result<Self, Self::Error> {
        match repr {
            CoordinateRepr::Text(s) => s.parse(),
            CoordinateRepr::Pair {
                latitude,
                longitude,
            } => Coordinate::new(latitude, longitude),
        }
    }
}

/// Surface distance in metres between two points on a spherical Earth
/// (haversine formula).
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
