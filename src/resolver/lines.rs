//! Reconstruction of the logical cursor line.

use tracing::debug;

use crate::source::TextSource;
use crate::types::{BufferId, CandidateLine, CursorContext};

/// Builds the candidate lines the cascade is tried against.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineAssembler;

impl LineAssembler {
    pub fn new() -> Self {
        Self
    }

    /// The cursor line with a soft-wrapped continuation appended.
    ///
    /// This is also the line the raw cfile is extracted from.
    pub async fn logical_line<S: TextSource + ?Sized>(&self, ctx: &CursorContext, source: &S) -> String {
        let mut line = ctx.line_text.clone();
        if ctx.is_soft_wrapped() {
            if let Some(next) = source.line_at(ctx.buffer_id, ctx.line_number + 1).await {
                debug!("Joining wrapped terminal line {}", ctx.line_number + 1);
                line.push_str(&next);
            }
        }
        line
    }

    /// Candidates in preference order: previous line joined onto the logical
    /// line (terminal buffers only), the logical line, the raw line.
    pub async fn build_candidate_lines<S: TextSource + ?Sized>(
        &self,
        ctx: &CursorContext,
        source: &S,
    ) -> Vec<CandidateLine> {
        let logical = self.logical_line(ctx, source).await;
        let mut candidates = Vec::with_capacity(3);

        if ctx.is_terminal_buffer {
            if let Some(prev) = previous_line(source, ctx.buffer_id, ctx.line_number).await {
                candidates.push(CandidateLine::new(
                    format!("{}{}", prev, logical),
                    ctx.column + prev.len(),
                    ctx.line_number - 1,
                ));
            }
        }

        push_unique(&mut candidates, CandidateLine::new(logical, ctx.column, ctx.line_number));
        push_unique(
            &mut candidates,
            CandidateLine::new(ctx.line_text.clone(), ctx.column, ctx.line_number),
        );

        candidates
    }

    /// A scanned line, joined with its continuation when it fills a terminal row.
    pub async fn reassemble<S: TextSource + ?Sized>(
        &self,
        ctx: &CursorContext,
        source: &S,
        line_number: usize,
        text: String,
    ) -> String {
        if !ctx.is_terminal_buffer || ctx.window_width == 0 || text.chars().count() < ctx.window_width {
            return text;
        }
        match source.line_at(ctx.buffer_id, line_number + 1).await {
            Some(next) => text + &next,
            None => text,
        }
    }
}

async fn previous_line<S: TextSource + ?Sized>(
    source: &S,
    buffer: BufferId,
    line_number: usize,
) -> Option<String> {
    match line_number.checked_sub(1) {
        Some(prev) if prev >= 1 => source.line_at(buffer, prev).await,
        _ => None,
    }
}

fn push_unique(candidates: &mut Vec<CandidateLine>, candidate: CandidateLine) {
    if !candidates.iter().any(|c| c.text == candidate.text && c.column == candidate.column) {
        candidates.push(candidate);
    }
}
