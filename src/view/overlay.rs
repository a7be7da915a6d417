//! What the map surface should draw for the current editor state

use crate::domain::GeoPoint;
use crate::editor::RegionEditor;
use crate::geometry::area::MIN_RING_VERTICES;

/// Initial map center (lat, lon) before any geolocation fix
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: 33.697643,
    lon: -117.946579,
};

pub const DEFAULT_ZOOM: u8 = 16;

/// Polyline through the traced vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub points: Vec<GeoPoint>,
    /// Drawn dashed until the ring can be closed
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOverlay {
    pub center: GeoPoint,
    pub zoom: u8,
    /// One marker per vertex, in insertion order
    pub markers: Vec<GeoPoint>,
    pub path: Option<Path>,
    /// Vertices with the first one repeated at the end
    pub ring: Option<Vec<GeoPoint>>,
    pub current_location: Option<GeoPoint>,
    /// Whether map taps are forwarded to the editor
    pub accepts_taps: bool,
}

impl MapOverlay {
    pub fn for_editor(editor: &RegionEditor, center: GeoPoint, zoom: u8) -> Self {
        let vertices = editor.vertices();

        let path = (vertices.len() >= 2).then(|| Path {
            points: vertices.to_vec(),
            dashed: vertices.len() < MIN_RING_VERTICES,
        });

        let ring = (vertices.len() >= MIN_RING_VERTICES).then(|| {
            let mut closed = vertices.to_vec();
            closed.push(vertices[0]);
            closed
        });

        Self {
            center,
            zoom,
            markers: vertices.to_vec(),
            path,
            ring,
            current_location: editor.current_location(),
            accepts_taps: !editor.is_locked(),
        }
    }

    /// Route a tap on the map to the editor, unless taps are suppressed
    pub fn tap(&self, editor: &mut RegionEditor, point: GeoPoint) -> bool {
        if !self.accepts_taps {
            return false;
        }

        editor.add_point(point);
        true
    }
}
