// Behavioral properties of the farm boundary editor

use farmtrace::geometry::{Projector, ring_area_sq_meters, shoelace_sum};
use farmtrace::{EditorState, GeoPoint, RegionEditor};

fn orchard() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(33.6982, -117.9472),
        GeoPoint::new(33.6974, -117.9458),
        GeoPoint::new(33.6961, -117.9462),
        GeoPoint::new(33.6967, -117.9475),
    ]
}

fn trace(points: &[GeoPoint]) -> RegionEditor {
    let mut editor = RegionEditor::new();
    for &p in points {
        editor.add_point(p);
    }
    editor
}

#[test]
fn test_short_rings_have_no_area() {
    let points = orchard();
    for n in 0..3 {
        let mut editor = trace(&points[..n]);
        assert_eq!(editor.compute_area(), 0.0);

        editor.complete();
        assert!(!editor.is_locked());
        assert_eq!(editor.compute_area(), 0.0);
    }
}

#[test]
fn test_locked_editor_rejects_points() {
    let mut editor = trace(&orchard());
    editor.complete();

    for i in 0..10 {
        editor.add_point(GeoPoint::new(i as f64, i as f64));
    }
    assert_eq!(editor.vertices().len(), 4);
}

#[test]
fn test_undo_on_empty_stays_editing() {
    let mut editor = RegionEditor::new();
    editor.undo();

    assert!(editor.vertices().is_empty());
    assert!(!editor.is_locked());
    assert!(!editor.is_saved());
}

#[test]
fn test_complete_then_undo_round_trip() {
    let mut editor = trace(&orchard());
    let before = editor.vertices().to_vec();

    editor.complete();
    assert_eq!(editor.state(), EditorState::Locked);
    editor.undo();

    assert_eq!(editor.state(), EditorState::Editing);
    assert_eq!(editor.vertices(), &before[..before.len() - 1]);
}

#[test]
fn test_area_invariant_under_rotation() {
    let points = orchard();
    let reference = ring_area_sq_meters(&points);

    for shift in 1..points.len() {
        let mut rotated = points.clone();
        rotated.rotate_left(shift);
        let area = ring_area_sq_meters(&rotated);
        assert!(
            (area - reference).abs() < 0.1,
            "rotation {} changed area: {} vs {}",
            shift,
            area,
            reference
        );
    }
}

#[test]
fn test_reversal_flips_sign_only() {
    let points = orchard();
    let projector = Projector::for_points(&points).unwrap();

    let forward = shoelace_sum(&projector.project_points(&points));
    let mut reversed_points = points.clone();
    reversed_points.reverse();
    let backward = shoelace_sum(&projector.project_points(&reversed_points));

    assert!(forward.signum() != backward.signum());
    assert!((forward.abs() - backward.abs()).abs() < 0.2);
    assert!(
        (ring_area_sq_meters(&points) - ring_area_sq_meters(&reversed_points)).abs()
            < 0.1
    );
}

#[test]
fn test_orchard_area_is_deterministic() {
    let mut editor = trace(&orchard());
    editor.complete();

    let area = editor.compute_area();
    assert!((area - 21_962.5).abs() < 1.0, "got {}", area);
    assert_eq!(area, trace_and_lock(&orchard()).compute_area());
}

fn trace_and_lock(points: &[GeoPoint]) -> RegionEditor {
    let mut editor = trace(points);
    editor.complete();
    editor
}

#[test]
fn test_save_before_complete_is_ignored() {
    let mut editor = trace(&orchard());
    editor.save("Riverside Orchard");
    assert!(!editor.is_saved());
    assert_eq!(editor.state(), EditorState::Editing);
}

#[test]
fn test_clear_after_complete_resets() {
    let mut editor = trace(&orchard());
    editor.complete();
    editor.clear();

    assert_eq!(editor.state(), EditorState::Editing);
    assert!(editor.vertices().is_empty());
    assert_eq!(editor.compute_area(), 0.0);

    editor.add_point(GeoPoint::new(0.0, 0.0));
    assert_eq!(editor.vertices().len(), 1);
}
