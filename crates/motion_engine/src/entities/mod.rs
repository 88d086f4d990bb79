//! Entities owned by the motion engine and the store that holds them

pub mod store;
pub mod star;
pub mod bubble;

pub use store::{Entity, EntityStore};
pub use star::{Star, StarId};
pub use bubble::{Bubble, BubbleFlags, BubbleId};
