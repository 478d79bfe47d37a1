//! Upload directory
//!
//! Files live flat under one directory, keyed by their sanitized name. A
//! later upload with the same name replaces the earlier file.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// Extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// Whether `filename` carries an allowed extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// Compatibility-decomposes and drops non-ASCII, turns path separators into
/// spaces, joins whitespace runs with `_`, removes anything outside
/// `[A-Za-z0-9_.-]` and strips leading/trailing `.` and `_`.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let ascii: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A filename that is known to be safe to join onto the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredName(String);

impl StoredName {
    /// Sanitize an uploaded filename.
    pub fn sanitize(raw: &str) -> Option<Self> {
        sanitize_filename(raw).map(Self)
    }

    /// Accept `raw` only if it is already in sanitized form.
    pub fn exact(raw: &str) -> Option<Self> {
        sanitize_filename(raw)
            .filter(|clean| clean == raw)
            .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StoredName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat on-disk store for uploaded PDFs
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn init(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    pub fn path_for(&self, name: &StoredName) -> PathBuf {
        self.dir.join(name.as_str())
    }

    /// Write `bytes` under `name`, replacing any previous file.
    pub async fn save(&self, name: &StoredName, bytes: &[u8]) -> io::Result<PathBuf> {
        self.init().await?;
        let path = self.path_for(name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    pub async fn read(&self, name: &StoredName) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path_for(name)).await
    }
}
