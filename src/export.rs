//! GeoJSON export of a finalized farm region

use geojson::{Feature, Geometry, JsonObject, Value};
use std::path::Path;
use thiserror::Error;

use crate::editor::RegionEditor;
use crate::geometry::to_polygon;
use crate::view::format_area;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Complete the selection before exporting the farm region")]
    NotLocked,
    #[error("Failed to serialize GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write GeoJSON file: {0}")]
    Io(#[from] std::io::Error),
}

/// Build a GeoJSON feature for a locked region.
///
/// The geometry is the closed polygon in lon/lat order; properties carry
/// the name, vertex count and area.
pub fn region_feature(editor: &RegionEditor) -> Result<Feature, ExportError> {
    if !editor.is_locked() {
        return Err(ExportError::NotLocked);
    }
    let polygon = to_polygon(editor.vertices()).ok_or(ExportError::NotLocked)?;

    let area = editor.compute_area();
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), editor.name().trim().into());
    properties.insert("vertices".to_string(), editor.vertices().len().into());
    properties.insert("area_sq_meters".to_string(), area.into());
    properties.insert("area_display".to_string(), format_area(area).into());

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&polygon))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Write the region feature as pretty-printed GeoJSON
pub fn write_geojson(path: &Path, editor: &RegionEditor) -> Result<(), ExportError> {
    let feature = region_feature(editor)?;
    let json = serde_json::to_string_pretty(&feature)?;
    std::fs::write(path, json)?;
    Ok(())
}
