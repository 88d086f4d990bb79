//! Placement initializer
//!
//! Seeds the initial entity set of a controller: separated circles for the
//! bubble cloud, depth-sorted stars for the starfield.

pub mod circles;
pub mod stars;

pub use circles::{place_circles, Placement, PlacementParams};
pub use stars::seed_stars;
