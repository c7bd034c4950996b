//! Models module for the thought stream
//!
//! Data types shared by the layout, interaction and scene modules.

pub mod config;
pub mod item;
pub mod note;

// Re-export commonly used types
pub use config::*;
pub use item::*;
pub use note::*;
