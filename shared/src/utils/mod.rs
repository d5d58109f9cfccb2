//! Common utility functions

pub mod code;

// Re-export commonly used utilities
pub use code::*;
