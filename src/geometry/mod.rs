pub mod area;
pub mod projection;

pub use area::{ring_area_sq_meters, shoelace_sum, to_polygon};
pub use projection::{EARTH_RADIUS_M, Projector};
