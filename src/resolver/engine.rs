//! The `resolve` operation: cascade, resolution, backward scan, cfile.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::resolver::backward::BackwardScan;
use crate::resolver::classify::ReferenceClassifier;
use crate::resolver::lines::LineAssembler;
use crate::resolver::path::{strip_diff_prefix, to_absolute, PathResolver};
use crate::resolver::patterns::{CascadeMatch, PatternCascade};
use crate::source::{CfileExtractor, TextSource};
use crate::types::{CandidateLine, CursorContext, ResolvedReference};

/// Jump-to-reference engine.
///
/// Holds no per-call state; `resolve` can be called any number of times.
pub struct FilePoint<E> {
    extractor: E,
    cascade: PatternCascade,
    assembler: LineAssembler,
    resolver: PathResolver,
    backward: BackwardScan,
    classifier: ReferenceClassifier,
}

impl<E: CfileExtractor> FilePoint<E> {
    /// Engine with the default tunables.
    pub fn new(extractor: E) -> Self {
        Self::with_config(extractor, ResolverConfig::default())
    }

    pub fn with_config(extractor: E, config: ResolverConfig) -> Self {
        let resolver = PathResolver::new(config.find_depth);
        Self {
            extractor,
            cascade: PatternCascade::new(),
            assembler: LineAssembler::new(),
            backward: BackwardScan::new(config.max_backward),
            classifier: ReferenceClassifier::new(resolver.clone()),
            resolver,
        }
    }

    /// Snapshot the cursor from `source` and resolve it.
    pub async fn resolve_at_cursor<S: TextSource + ?Sized>(&self, source: &S) -> Vec<ResolvedReference> {
        let ctx = CursorContext::capture(source).await;
        self.resolve(&ctx, source).await
    }

    /// Resolve the references under the cursor of `ctx`.
    ///
    /// `source` is only used to fetch neighbouring lines. The structured
    /// match, if any, comes first; a URL or file named by the raw token
    /// follows.
    pub async fn resolve<S: TextSource + ?Sized>(
        &self,
        ctx: &CursorContext,
        source: &S,
    ) -> Vec<ResolvedReference> {
        let logical = self.assembler.logical_line(ctx, source).await;
        let cfile = self.cfile(&logical, ctx.column).await;
        let candidates = self.assembler.build_candidate_lines(ctx, source).await;

        let mut references = Vec::new();
        let structured = self.structured_reference(ctx, source, &candidates).await;
        let structured_found = structured.is_some();
        references.extend(structured);

        if let Some(reference) = self
            .classifier
            .classify(&cfile, &ctx.working_directory, structured_found)
            .await
        {
            references.push(reference);
        }

        info!(
            "Resolved {} reference(s) at line {} col {}",
            references.len(),
            ctx.line_number,
            ctx.column
        );
        references
    }

    /// Extract a token, treating extractor failures as "no token".
    async fn cfile(&self, line: &str, column: usize) -> String {
        match self.extractor.extract(line, column).await {
            Ok(token) => token,
            Err(e) => {
                debug!("Cfile extraction unavailable: {}", e);
                String::new()
            }
        }
    }

    /// First cascade hit that resolves to an existing path.
    async fn structured_reference<S: TextSource + ?Sized>(
        &self,
        ctx: &CursorContext,
        source: &S,
        candidates: &[CandidateLine],
    ) -> Option<ResolvedReference> {
        let mut scanned = false;

        for hit in self.cascade.matches(candidates) {
            debug!(
                "{:?} matched {:?} (path token {:?})",
                hit.family, hit.recognized.raw_match_text, hit.recognized.path_token
            );

            let found = if hit.family.is_location_only() {
                if scanned {
                    continue;
                }
                scanned = true;
                let start = hit.source_line.first_line.saturating_sub(1);
                self.backward
                    .scan(ctx, source, &self.extractor, &self.resolver, start)
                    .await
            } else {
                self.resolve_token(ctx, &hit).await
            };

            if let Some(path) = found {
                return Some(ResolvedReference::file(
                    hit.recognized.raw_match_text,
                    to_absolute(&path, &ctx.working_directory),
                    hit.recognized.line_number,
                    hit.recognized.column,
                ));
            }
        }

        None
    }

    /// Resolve a hit's path token, falling back to the cfile of its line.
    async fn resolve_token(&self, ctx: &CursorContext, hit: &CascadeMatch<'_>) -> Option<PathBuf> {
        let cwd = &ctx.working_directory;
        if let Some(path) = self.resolver.resolve(&hit.recognized.path_token, cwd).await {
            return Some(path);
        }

        let token = self.cfile(&hit.source_line.text, hit.source_line.column).await;
        let token = strip_diff_prefix(&token);
        if token.is_empty() || token == hit.recognized.path_token {
            return None;
        }
        debug!("Path token unresolved, trying cfile {:?}", token);
        self.resolver.resolve(token, cwd).await
    }
}
