//! Default cfile extraction using the editor's file-name character class.

use async_trait::async_trait;

use crate::error::Result;
use crate::source::CfileExtractor;

/// Punctuation accepted in file names besides alphanumerics.
const FNAME_PUNCTUATION: &[u8] = b"/.-_+,#$%~=";

/// Extra characters allowed once a token has been recognized as a URL.
const URL_PUNCTUATION: &[u8] = b":?&=";

/// Characters dropped from the end of a token.
const TRAILING_PUNCTUATION: &[u8] = b".,:;!";

/// Extracts the file name under a column the way editors do for `gf`.
///
/// Bytes above 0x7f always count as file-name characters, so token
/// boundaries always fall on ASCII bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsfnameExtractor;

impl IsfnameExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous extraction.
    pub fn token_at(line: &str, column: usize) -> String {
        let bytes = line.as_bytes();
        let len = bytes.len();

        // Move right to the first file-name character.
        let mut col = column.saturating_sub(1).min(len);
        while col < len && !is_fname(bytes[col]) {
            col += 1;
        }

        // Expand left, stepping over the ":" of a "://" separator.
        let mut start = col;
        while start > 0 {
            if is_fname(bytes[start - 1]) {
                start -= 1;
            } else if bytes[start - 1] == b':' && bytes[start..].starts_with(b"//") {
                start -= 1;
            } else {
                break;
            }
        }

        let mut end = start;
        let mut in_scheme = true;
        let mut is_url = false;
        while end < len {
            let b = bytes[end];
            let accepted = is_fname(b)
                || bytes[end..].starts_with(b"://")
                || (is_url && URL_PUNCTUATION.contains(&b));
            if !accepted {
                break;
            }
            if b.is_ascii_alphabetic() {
                if in_scheme && bytes[end + 1..].starts_with(b"://") {
                    is_url = true;
                }
            } else {
                in_scheme = false;
            }
            end += 1;
        }

        if end - start > 2
            && TRAILING_PUNCTUATION.contains(&bytes[end - 1])
            && bytes[end - 2] != b'.'
        {
            end -= 1;
        }

        line.get(start..end).unwrap_or_default().to_string()
    }
}

#[async_trait]
impl CfileExtractor for IsfnameExtractor {
    async fn extract(&self, line: &str, column: usize) -> Result<String> {
        Ok(Self::token_at(line, column))
    }
}

fn is_fname(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b >= 0x80 || FNAME_PUNCTUATION.contains(&b)
}
