pub mod controls;
pub mod format;
pub mod overlay;

pub use controls::{Controls, complete_label};
pub use format::{CoordinateRow, coordinate_rows, format_area, status_message};
pub use overlay::{DEFAULT_CENTER, DEFAULT_ZOOM, MapOverlay, Path};
