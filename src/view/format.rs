//! Display strings for the add-farm screen

use crate::domain::GeoPoint;

/// Areas at or above this many square meters are shown in km²
pub const KM2_THRESHOLD_SQ_METERS: f64 = 1_000_000.0;

/// Placeholder shown while no area is available
pub const AREA_PLACEHOLDER: &str = "—";

pub const EMPTY_COORDINATES: &str = "No points selected yet.";

pub const SAVED_MESSAGE: &str =
    "Farm region saved locally. You can sync with the dashboard later.";
pub const UNSAVED_MESSAGE: &str =
    "Complete the polygon and provide a name to save your farm region.";

/// Format an area in square meters.
///
/// Exactly zero shows the placeholder; below 1,000,000 m² whole square
/// meters; otherwise square kilometers with two decimals.
pub fn format_area(area_sq_meters: f64) -> String {
    if area_sq_meters == 0.0 {
        return AREA_PLACEHOLDER.to_string();
    }

    if area_sq_meters >= KM2_THRESHOLD_SQ_METERS {
        format!("{:.2} km²", area_sq_meters / 1_000_000.0)
    } else {
        format!("{:.0} m²", area_sq_meters)
    }
}

/// One row of the coordinate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateRow {
    pub label: String,
    pub value: String,
}

/// Numbered rows for each vertex, starting at "Point 1"
pub fn coordinate_rows(vertices: &[GeoPoint]) -> Vec<CoordinateRow> {
    vertices
        .iter()
        .enumerate()
        .map(|(i, point)| CoordinateRow {
            label: format!("Point {}", i + 1),
            value: point.to_string(),
        })
        .collect()
}

pub fn status_message(saved: bool) -> &'static str {
    if saved { SAVED_MESSAGE } else { UNSAVED_MESSAGE }
}
