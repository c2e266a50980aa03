//! Reference extraction and resolution engine.
//!
//! Data flows leaf first:
//!
//! - [`lines`] builds the candidate lines around the cursor
//! - [`patterns`] runs the ordered cascade over them
//! - [`path`] turns path tokens into existing files
//! - [`backward`] recovers the file of location-only matches
//! - [`classify`] handles the raw cursor token (URL or plain path)
//! - [`engine`] composes all of the above into [`FilePoint::resolve`]

pub mod backward;
pub mod classify;
pub mod engine;
pub mod lines;
pub mod path;
pub mod patterns;

pub use backward::BackwardScan;
pub use classify::ReferenceClassifier;
pub use engine::FilePoint;
pub use lines::LineAssembler;
pub use path::PathResolver;
pub use patterns::{Pattern, PatternCascade, PatternFamily};
