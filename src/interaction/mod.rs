//! Pointer interaction with cards

pub mod drag;

pub use drag::{DragTiming, DragTracker, Release};
