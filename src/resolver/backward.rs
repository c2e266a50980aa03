//! Bounded upward scan recovering the file of a location-only match.
//!
//! Compilers and linters often print the file once and then a run of
//! `line:col` messages below it, and diffs name the file a few lines above
//! each hunk header.

use std::path::PathBuf;
use tracing::{debug, trace};

use crate::resolver::lines::LineAssembler;
use crate::resolver::path::{strip_diff_prefix, PathResolver};
use crate::source::{CfileExtractor, TextSource};
use crate::types::CursorContext;
use crate::DEFAULT_MAX_BACKWARD;

/// Walks upward from a line, looking for a line whose cfile resolves.
#[derive(Debug, Clone)]
pub struct BackwardScan {
    max_lines: usize,
    assembler: LineAssembler,
}

impl Default for BackwardScan {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BACKWARD)
    }
}

impl BackwardScan {
    pub fn new(max_lines: usize) -> Self {
        Self {
            max_lines,
            assembler: LineAssembler::new(),
        }
    }

    /// Scan upward starting at `start_line`, examining at most `max_lines`
    /// lines and stopping at the first line outside the buffer. Returns the
    /// resolved path of the nearest line whose cfile names a file.
    pub async fn scan<S, E>(
        &self,
        ctx: &CursorContext,
        source: &S,
        extractor: &E,
        resolver: &PathResolver,
        start_line: usize,
    ) -> Option<PathBuf>
    where
        S: TextSource + ?Sized,
        E: CfileExtractor + ?Sized,
    {
        for line_number in (1..=start_line).rev().take(self.max_lines) {
            let Some(text) = source.line_at(ctx.buffer_id, line_number).await else {
                trace!("Backward scan left the buffer at line {}", line_number);
                break;
            };
            let text = self.assembler.reassemble(ctx, source, line_number, text).await;

            let token = match extractor.extract(&text, ctx.column).await {
                Ok(token) => token,
                Err(e) => {
                    trace!("No cfile on line {}: {}", line_number, e);
                    continue;
                }
            };
            if token.is_empty() {
                continue;
            }

            let stripped = strip_diff_prefix(&token);
            let mut found = resolver.resolve(stripped, &ctx.working_directory).await;
            if found.is_none() && stripped != token {
                found = resolver.resolve(&token, &ctx.working_directory).await;
            }

            if let Some(path) = found {
                debug!("Backward scan found {} on line {}", path.display(), line_number);
                return Some(path);
            }
        }

        debug!(
            "Backward scan from line {} found no file within {} lines",
            start_line, self.max_lines
        );
        None
    }
}
