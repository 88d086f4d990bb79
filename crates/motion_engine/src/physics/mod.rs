//! Physics integrators
//!
//! Per-tick motion for stars and bubbles, circle collision primitives and
//! the eased pointer follower. Every integrator advances by exactly one tick;
//! none of them scale by elapsed time.

pub mod bubbles;
pub mod collision;
pub mod follower;
pub mod starfield;

pub use bubbles::{step_bubbles, CloudBounds, StepReport};
pub use collision::{BoundingCircle, Contact};
pub use follower::{magnetic_offset, CursorFollower};
pub use starfield::{project, step_starfield, Projection, StarMotion};
