//! Utility modules for the thought stream

pub mod performance;

// Re-export commonly used types
pub use performance::*;
