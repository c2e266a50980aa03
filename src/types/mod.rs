//! Core type definitions for file-point.
//!
//! All of these are created fresh for one resolution and dropped afterwards.

pub mod context;
pub mod reference;

// Re-export commonly used types
pub use context::*;
pub use reference::*;
