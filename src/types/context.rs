//! Cursor snapshot and candidate line types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::source::TextSource;

/// Opaque handle identifying a host buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferId(pub u64);

/// Immutable snapshot of the cursor state, taken once per resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorContext {
    /// Text of the cursor line
    pub line_text: String,
    /// Cursor line (1-based)
    pub line_number: usize,
    /// Cursor column (1-based byte column)
    pub column: usize,
    /// Buffer the cursor is in
    pub buffer_id: BufferId,
    /// Working directory for relative paths
    pub working_directory: PathBuf,
    /// Whether the buffer is a terminal buffer
    pub is_terminal_buffer: bool,
    /// Width of the window showing the buffer
    pub window_width: usize,
    /// One past the last column of the cursor line
    pub max_column: usize,
}

impl CursorContext {
    /// Buffer type reported by hosts for terminal buffers.
    pub const TERMINAL_BUFFER_TYPE: &'static str = "terminal";

    /// Query every field from the host once.
    pub async fn capture<S: TextSource + ?Sized>(source: &S) -> Self {
        Self {
            line_text: source.current_line().await,
            line_number: source.cursor_line().await,
            column: source.cursor_column().await,
            buffer_id: source.buffer_id().await,
            working_directory: source.working_directory().await,
            is_terminal_buffer: source.buffer_type().await == Self::TERMINAL_BUFFER_TYPE,
            window_width: source.window_width().await,
            max_column: source.last_column().await,
        }
    }

    /// Whether the cursor line is a terminal line wrapped by the window.
    pub fn is_soft_wrapped(&self) -> bool {
        self.is_terminal_buffer && self.max_column > self.window_width
    }
}

/// A reconstructed line considered for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateLine {
    /// Line text, possibly joined with neighbouring lines
    pub text: String,
    /// Cursor column within `text` (1-based)
    pub column: usize,
    /// Buffer line the text starts at
    pub first_line: usize,
}

impl CandidateLine {
    pub fn new(text: impl Into<String>, column: usize, first_line: usize) -> Self {
        Self {
            text: text.into(),
            column,
            first_line,
        }
    }
}
