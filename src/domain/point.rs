use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 position in decimal degrees.
///
/// No range validation is done here: the map surface is trusted to hand
/// over latitudes in [-90, 90] and longitudes in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to a `geo` coordinate (x = lon, y = lat)
    pub fn to_coord(self) -> geo::Coord<f64> {
        geo::coord! { x: self.lon, y: self.lat }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(point: GeoPoint) -> Self {
        (point.lat, point.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_is_lat_lon() {
        let point = GeoPoint::from((33.6982, -117.9472));
        assert_eq!(point.lat, 33.6982);
        assert_eq!(point.lon, -117.9472);
    }

    #[test]
    fn test_coord_swaps_axes() {
        let coord = GeoPoint::new(10.0, 20.0).to_coord();
        assert_eq!(coord.x, 20.0);
        assert_eq!(coord.y, 10.0);
    }

    #[test]
    fn test_display_five_decimals() {
        let point = GeoPoint::new(33.697643, -117.946579);
        assert_eq!(point.to_string(), "33.69764, -117.94658");
    }
}
