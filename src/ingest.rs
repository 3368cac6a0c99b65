//! Plain-text document ingestion.
//!
//! Source files have no declared encoding. Bytes are decoded as UTF-8 with
//! invalid sequences replaced, and a leading byte-order mark is dropped.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::diagnostics::JobsafeError;

/// An ingested contract, ready to be split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        let decoded = String::from_utf8_lossy(bytes);
        let text = decoded.strip_prefix('\u{feff}').unwrap_or(&*decoded);
        Self::from_text(name, text)
    }

    pub fn from_path(path: &Path) -> Result<Self, JobsafeError> {
        let bytes = fs::read(path).map_err(|source| JobsafeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read document");
        Ok(Self::from_bytes(path.display().to_string(), &bytes))
    }

    /// Lines of the trimmed document. Carriage returns from CRLF files are
    /// removed; blank lines are kept so line numbers stay true.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text
            .trim()
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }

    /// Hex SHA-256 of the decoded text.
    pub fn digest(&self) -> String {
        format!("{:x}", Sha256::digest(self.text.as_bytes()))
    }
}
