//! Host capabilities consumed by the resolver.
//!
//! The engine only talks to the host through these two traits. The
//! bundled [`BufferSource`] and [`IsfnameExtractor`] back the CLI and the
//! tests; an editor integration provides its own.

pub mod buffer;
pub mod cfile;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::Result;
use crate::types::BufferId;

pub use buffer::BufferSource;
pub use cfile::IsfnameExtractor;

/// Read-only view of the host editor's buffer and cursor state.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Text of the cursor line.
    async fn current_line(&self) -> String;

    /// Line `line_number` (1-based) of a buffer, `None` when out of range.
    async fn line_at(&self, buffer: BufferId, line_number: usize) -> Option<String>;

    /// Cursor line (1-based).
    async fn cursor_line(&self) -> usize;

    /// Cursor column (1-based byte column).
    async fn cursor_column(&self) -> usize;

    /// Buffer the cursor is in.
    async fn buffer_id(&self) -> BufferId;

    async fn working_directory(&self) -> PathBuf;

    /// Buffer type, `"terminal"` for terminal buffers.
    async fn buffer_type(&self) -> String;

    async fn window_width(&self) -> usize;

    /// One past the last byte column of the cursor line.
    async fn last_column(&self) -> usize;
}

/// Extracts the file-name-like token under a column ("cfile").
#[async_trait]
pub trait CfileExtractor: Send + Sync {
    /// Token of `line` under the 1-based byte `column`.
    async fn extract(&self, line: &str, column: usize) -> Result<String>;
}
