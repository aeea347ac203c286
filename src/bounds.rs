// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

use crate::Coordinates;
use serde_derive::Serialize;

/// Length in miles of one degree of latitude.
pub const LAT_DEGREE_IN_MILES: f64 = 69.172;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Span {
    pub max: f64,
    pub min: f64,
}

/// Square box of roughly `2 * miles` per side centered on a point.
///
/// The longitude span is widened by `1 / cos(latitude)`, so it grows without
/// bound close to the poles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub lat: Span,
    pub lon: Span,
}

impl BoundingBox {
    pub fn around(latitude: f64, longitude: f64, miles: f64) -> Self {
        let max_lat = latitude + miles / LAT_DEGREE_IN_MILES;
        let min_lat = latitude - (max_lat - latitude);
        let max_lon = longitude
            + miles / (min_lat.to_radians().cos() * LAT_DEGREE_IN_MILES);
        let min_lon = longitude - (max_lon - longitude);
        BoundingBox {
            lat: Span {max: max_lat, min: min_lat},
            lon: Span {max: max_lon, min: min_lon},
        }
    }

    pub fn southwest(&self) -> Coordinates {
        Coordinates {latitude: self.lat.min, longitude: self.lon.min}
    }

    pub fn northeast(&self) -> Coordinates {
        Coordinates {latitude: self.lat.max, longitude: self.lon.max}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn twenty_miles_around_point() {
        let b = BoundingBox::around(19.0, -130.0, 20.0);
        assert!(close(b.lat.max, 19.2891343), "{:?}", b);
        assert!(close(b.lat.min, 18.7108657), "{:?}", b);
        assert!(close(b.lon.max, -129.6947321), "{:?}", b);
        assert!(close(b.lon.min, -130.3052679), "{:?}", b);
    }

    #[test]
    fn corners() {
        let b = BoundingBox::around(0.0, 0.0, 69.172);
        assert!(close(b.southwest().latitude, -1.0));
        assert!(close(b.northeast().latitude, 1.0));
        assert!(b.southwest().longitude < -1.0);
        assert!(b.northeast().longitude > 1.0);
    }

    #[test]
    fn zero_range_is_a_point() {
        let b = BoundingBox::around(45.5, 7.25, 0.0);
        assert_eq!(b.lat, Span {max: 45.5, min: 45.5});
        assert_eq!(b.lon, Span {max: 7.25, min: 7.25});
    }
}
