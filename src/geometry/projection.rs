use crate::domain::GeoPoint;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Equirectangular projection from WGS84 to planar meters
///
/// Uses the approximation:
/// - x = R * lon_rad * cos(ref_lat)
/// - y = R * lat_rad
///
/// The origin is (0, 0) in degrees, not the reference point, so projected
/// values are large and only differences between them are meaningful.
/// Accurate enough for field-sized regions (tens of hectares); no
/// ellipsoidal or great-circle correction is applied.
#[derive(Debug, Clone)]
pub struct Projector {
    cos_ref_lat: f64,
}

impl Projector {
    /// Create a projector scaling longitude by the cosine of `ref_lat_deg`
    pub fn new(ref_lat_deg: f64) -> Self {
        Self {
            cos_ref_lat: ref_lat_deg.to_radians().cos(),
        }
    }

    /// Create a projector whose reference latitude is the mean latitude of
    /// `points`. Returns `None` for an empty slice.
    pub fn for_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mean_lat = points.iter().map(|p| p.lat).sum::<f64>() / points.len() as f64;
        Some(Self::new(mean_lat))
    }

    /// Project a point to planar meters
    ///
    /// # Returns
    /// * (x, y) in meters
    pub fn project(&self, point: GeoPoint) -> (f64, f64) {
        let x = EARTH_RADIUS_M * point.lon.to_radians() * self.cos_ref_lat;
        let y = EARTH_RADIUS_M * point.lat.to_radians();

        (x, y)
    }

    /// Project a slice of points
    pub fn project_points(&self, points: &[GeoPoint]) -> Vec<(f64, f64)> {
        points.iter().map(|&p| self.project(p)).collect()
    }
}
