//! File Point - jump-to-reference resolution for text editors
//!
//! Given the line under the cursor, recognizes the usual "location reference"
//! idioms (compiler errors, stack traces, diff hunks, quoted file citations)
//! and resolves them to an existing file plus an optional line/column, or to
//! a URL.
//!
//! # Architecture
//!
//! 1. **Sources** (`source`) - host capabilities: buffer text and cfile extraction
//! 2. **Types** (`types`) - cursor snapshot, recognized matches, resolved references
//! 3. **Resolver** (`resolver`) - line assembly, pattern cascade, path search,
//!    backward scan, raw token classification and the orchestrating engine
//!
//! # Example
//!
//! ```no_run
//! use file_point::resolver::FilePoint;
//! use file_point::source::{BufferSource, IsfnameExtractor};
//!
//! # async fn run() -> file_point::Result<()> {
//! let buffer = BufferSource::from_text("src/main.rs:10:5: unused variable")
//!     .with_cursor(1, 1)
//!     .with_working_directory("/work/project");
//! let engine = FilePoint::new(IsfnameExtractor::new());
//! for reference in engine.resolve_at_cursor(&buffer).await {
//!     println!("{}", reference);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod resolver;
pub mod source;
pub mod types;

pub use error::{Error, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of lines walked upward to recover a file name.
pub const DEFAULT_MAX_BACKWARD: usize = 100;

/// Directory depth for the recursive file search.
pub const DEFAULT_FIND_DEPTH: usize = 5;
