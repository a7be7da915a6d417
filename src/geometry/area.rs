//! Planar polygon area over projected geographic coordinates

use geo::{LineString, Polygon};

use super::Projector;
use crate::domain::GeoPoint;

/// Minimum number of vertices for a ring to enclose an area
pub const MIN_RING_VERTICES: usize = 3;

/// Signed shoelace sum over a closed ring.
///
/// The closing edge from the last point back to the first is implicit.
/// The sign follows the winding order; the area is half the magnitude.
pub fn shoelace_sum(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;

    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }

    sum
}

/// Area in square meters of the ring traced by `points`.
///
/// Projects with an equirectangular approximation referenced at the mean
/// latitude, then applies the shoelace formula. Rings with fewer than three
/// vertices have zero area.
pub fn ring_area_sq_meters(points: &[GeoPoint]) -> f64 {
    if points.len() < MIN_RING_VERTICES {
        return 0.0;
    }

    let Some(projector) = Projector::for_points(points) else {
        return 0.0;
    };
    let projected = projector.project_points(points);

    shoelace_sum(&projected).abs() / 2.0
}

/// Build a closed `geo` polygon (x = lon, y = lat) from a vertex ring.
///
/// Returns `None` when the ring has fewer than three vertices.
pub fn to_polygon(points: &[GeoPoint]) -> Option<Polygon<f64>> {
    if points.len() < MIN_RING_VERTICES {
        return None;
    }

    // LineString -> Polygon closes the ring
    let exterior: LineString<f64> = points.iter().map(|p| p.to_coord()).collect();
    Some(Polygon::new(exterior, vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolsa_chica() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(33.6982, -117.9472),
            GeoPoint::new(33.6974, -117.9458),
            GeoPoint::new(33.6961, -117.9462),
            GeoPoint::new(33.6967, -117.9475),
        ]
    }

    #[test]
    fn test_shoelace_unit_square() {
        let ccw = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        assert_eq!(shoelace_sum(&ccw), 2.0);

        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert_eq!(shoelace_sum(&cw), -2.0);
    }

    #[test]
    fn test_shoelace_empty() {
        assert_eq!(shoelace_sum(&[]), 0.0);
    }

    #[test]
    fn test_ring_area_too_few_points() {
        let points = bolsa_chica();
        assert_eq!(ring_area_sq_meters(&[]), 0.0);
        assert_eq!(ring_area_sq_meters(&points[..1]), 0.0);
        assert_eq!(ring_area_sq_meters(&points[..2]), 0.0);
    }

    #[test]
    fn test_ring_area_field() {
        let area = ring_area_sq_meters(&bolsa_chica());
        assert!((area - 21_962.5).abs() < 1.0, "got {}", area);
    }

    #[test]
    fn test_ring_area_near_equator_square() {
        let points = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.01),
            GeoPoint::new(0.01, 0.01),
            GeoPoint::new(0.01, 0.0),
        ];
        let area = ring_area_sq_meters(&points);
        assert!((area - 1_236_431.17).abs() < 0.5, "got {}", area);
    }

    #[test]
    fn test_to_polygon_closes_ring() {
        let polygon = to_polygon(&bolsa_chica()).unwrap();
        let exterior = polygon.exterior();
        assert_eq!(exterior.0.len(), 5);
        assert_eq!(exterior.0.first(), exterior.0.last());
        assert!(to_polygon(&bolsa_chica()[..2]).is_none());
    }
}
