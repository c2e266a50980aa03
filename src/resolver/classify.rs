//! Classification of the raw cursor token.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

use crate::resolver::path::{to_absolute, PathResolver};
use crate::resolver::patterns::URL_PREFIX;
use crate::types::ResolvedReference;

static ONLY_SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/+$").expect("valid slash regex"));

/// Turns the cfile into a URL or file reference.
#[derive(Debug, Clone, Default)]
pub struct ReferenceClassifier {
    resolver: PathResolver,
}

impl ReferenceClassifier {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Classify `cfile`.
    ///
    /// URLs are always reported. Anything else is only considered when no
    /// structured match produced a reference, and only if it looks like a
    /// path (contains a separator or has an extension).
    pub async fn classify(
        &self,
        cfile: &str,
        cwd: &Path,
        structured_match_found: bool,
    ) -> Option<ResolvedReference> {
        if URL_PREFIX.is_match(cfile) {
            return Some(ResolvedReference::url(cfile));
        }
        if structured_match_found || cfile.is_empty() || ONLY_SLASHES.is_match(cfile) {
            return None;
        }
        if !looks_like_path(cfile) {
            return None;
        }

        let found = self.resolver.resolve(cfile, cwd).await?;
        let word = found.to_string_lossy().to_string();
        debug!("Cfile {} resolved to {}", cfile, word);
        Some(ResolvedReference::file(word, to_absolute(&found, cwd), None, None))
    }
}

fn looks_like_path(token: &str) -> bool {
    token.contains('/')
        || Path::new(token)
            .extension()
            .is_some_and(|ext| !ext.is_empty())
}
