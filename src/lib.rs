//! farmtrace - Trace farm boundaries on a map and measure their area

pub mod config;
pub mod domain;
pub mod editor;
pub mod export;
pub mod geometry;
pub mod locate;
pub mod session;
pub mod view;

pub use domain::GeoPoint;
pub use editor::{EditorState, RegionEditor};
pub use geometry::Projector;
