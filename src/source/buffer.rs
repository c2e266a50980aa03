//! In-memory buffer implementing [`TextSource`].

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::source::TextSource;
use crate::types::{BufferId, CursorContext};

/// A buffer snapshot with a cursor.
#[derive(Debug, Clone)]
pub struct BufferSource {
    id: BufferId,
    lines: Vec<String>,
    cursor_line: usize,
    cursor_column: usize,
    working_directory: PathBuf,
    buffer_type: String,
    window_width: usize,
}

impl BufferSource {
    /// Create a buffer from already split lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            id: BufferId::default(),
            lines,
            cursor_line: 1,
            cursor_column: 1,
            working_directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            buffer_type: String::new(),
            window_width: 80,
        }
    }

    /// Create a buffer from text, one line per `\n`.
    pub fn from_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect(),
        )
    }

    /// Load a buffer from a file on disk.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::BufferNotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Loaded buffer {} ({} bytes)", path.display(), text.len());
        Ok(Self::from_text(&text))
    }

    /// Load a buffer from standard input.
    pub async fn from_stdin() -> Result<Self> {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        Ok(Self::from_text(&text))
    }

    pub fn with_id(mut self, id: BufferId) -> Self {
        self.id = id;
        self
    }

    /// Place the cursor (1-based line and byte column).
    pub fn with_cursor(mut self, line: usize, column: usize) -> Self {
        self.cursor_line = line;
        self.cursor_column = column;
        self
    }

    pub fn with_working_directory(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.working_directory = cwd.into();
        self
    }

    /// Mark the buffer as a terminal buffer shown in a window of `width` columns.
    pub fn as_terminal(mut self, width: usize) -> Self {
        self.buffer_type = CursorContext::TERMINAL_BUFFER_TYPE.to_string();
        self.window_width = width;
        self
    }

    pub fn with_window_width(mut self, width: usize) -> Self {
        self.window_width = width;
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check that the cursor sits on an existing line.
    pub fn validate_cursor(&self) -> Result<()> {
        if self.cursor_line == 0 || self.cursor_line > self.lines.len().max(1) {
            return Err(Error::InvalidCursor {
                line: self.cursor_line,
                line_count: self.lines.len(),
            });
        }
        Ok(())
    }

    fn line(&self, line_number: usize) -> Option<&str> {
        line_number
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(String::as_str)
    }
}

#[async_trait]
impl TextSource for BufferSource {
    async fn current_line(&self) -> String {
        self.line(self.cursor_line).unwrap_or_default().to_string()
    }

    async fn line_at(&self, buffer: BufferId, line_number: usize) -> Option<String> {
        if buffer != self.id {
            return None;
        }
        self.line(line_number).map(str::to_string)
    }

    async fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    async fn cursor_column(&self) -> usize {
        self.cursor_column
    }

    async fn buffer_id(&self) -> BufferId {
        self.id
    }

    async fn working_directory(&self) -> PathBuf {
        self.working_directory.clone()
    }

    async fn buffer_type(&self) -> String {
        self.buffer_type.clone()
    }

    async fn window_width(&self) -> usize {
        self.window_width
    }

    async fn last_column(&self) -> usize {
        self.line(self.cursor_line).map_or(0, str::len) + 1
    }
}
