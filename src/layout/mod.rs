//! Layout: where cards appear and how they move
//!
//! - `placement`: collision-avoiding height search for right-edge spawns
//! - `motion`: per-frame advance, edge bounce and left-edge culling
//! - `spawn`: headings, speeds and initial-batch positions

pub mod motion;
pub mod placement;
pub mod spawn;

pub use motion::{step, MotionBounds, StepReport};
pub use placement::{find_y, plan, Placement, PlacementRules};
pub use spawn::{initial_position, random_velocity};
