//! Recognized matches and resolved references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of a resolved reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    File,
    Url,
}

/// Location reference recognized on a line by one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedMatch {
    /// Whole text matched by the pattern
    pub raw_match_text: String,
    /// Path token; empty when the line names a location but no file
    pub path_token: String,
    /// Line number, if captured
    pub line_number: Option<u32>,
    /// Column number, if captured
    pub column: Option<u32>,
}

/// What a reference points at. File and URL targets are exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReferenceTarget {
    File {
        path: PathBuf,
        #[serde(skip_serializing_if = "Option::is_none")]
        line: Option<u32>,
        #[serde(rename = "col", skip_serializing_if = "Option::is_none")]
        column: Option<u32>,
    },
    Url {
        url: String,
    },
}

/// A reference handed to the selection UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReference {
    /// Human-readable label for list presentation
    pub word: String,
    #[serde(flatten)]
    pub target: ReferenceTarget,
}

impl ResolvedReference {
    pub fn file(
        word: impl Into<String>,
        path: impl Into<PathBuf>,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Self {
        Self {
            word: word.into(),
            target: ReferenceTarget::File {
                path: path.into(),
                line,
                column,
            },
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            word: url.clone(),
            target: ReferenceTarget::Url { url },
        }
    }

    pub fn kind(&self) -> ReferenceKind {
        match self.target {
            ReferenceTarget::File { .. } => ReferenceKind::File,
            ReferenceTarget::Url { .. } => ReferenceKind::Url,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.target {
            ReferenceTarget::File { path, .. } => Some(path),
            ReferenceTarget::Url { .. } => None,
        }
    }

    pub fn url_str(&self) -> Option<&str> {
        match &self.target {
            ReferenceTarget::Url { url } => Some(url),
            ReferenceTarget::File { .. } => None,
        }
    }

    pub fn line_number(&self) -> Option<u32> {
        match self.target {
            ReferenceTarget::File { line, .. } => line,
            ReferenceTarget::Url { .. } => None,
        }
    }

    pub fn column(&self) -> Option<u32> {
        match self.target {
            ReferenceTarget::File { column, .. } => column,
            ReferenceTarget::Url { .. } => None,
        }
    }
}

impl fmt::Display for ResolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            ReferenceTarget::File { path, line, column } => {
                write!(f, "{}", path.display())?;
                if let Some(line) = line {
                    write!(f, ":{}", line)?;
                    if let Some(column) = column {
                        write!(f, ":{}", column)?;
                    }
                }
                Ok(())
            }
            ReferenceTarget::Url { url } => write!(f, "{}", url),
        }
    }
}
