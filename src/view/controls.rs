use crate::editor::RegionEditor;

pub const COMPLETE_LABEL: &str = "Complete selection";
pub const LOCKED_LABEL: &str = "Selection locked";

/// Enabled state of each control on the add-farm screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub undo: bool,
    pub clear: bool,
    pub complete: bool,
    pub save: bool,
    pub locate: bool,
    pub map_taps: bool,
}

impl Controls {
    /// Derive control state from the editor and whether a locate request
    /// is still in flight
    pub fn for_editor(editor: &RegionEditor, locating: bool) -> Self {
        let has_vertices = !editor.vertices().is_empty();

        Self {
            undo: has_vertices,
            clear: has_vertices,
            complete: editor.can_complete() && !editor.is_locked(),
            save: editor.can_save(),
            locate: !locating,
            map_taps: !editor.is_locked(),
        }
    }
}

pub fn complete_label(locked: bool) -> &'static str {
    if locked { LOCKED_LABEL } else { COMPLETE_LABEL }
}
