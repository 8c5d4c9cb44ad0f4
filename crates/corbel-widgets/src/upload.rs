#![forbid(unsafe_code)]

//! Upload constraint checking.
//!
//! [`UploadPolicy`] answers one question: may this file (or batch of
//! files) enter the upload queue? It checks names, extensions, and sizes.
//! Reading, chunking, and transport are the embedder's problem.
//!
//! Extension matching is case-insensitive on the final dot-suffix, so
//! `archive.tar.gz` is a `gz` file and dotfiles like `.env` have no
//! extension at all.

use ahash::AHashSet;

/// Why a file was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    /// The file name is empty or whitespace.
    EmptyName,
    /// The extension is not in the accept set.
    UnsupportedType {
        /// Normalized extension, empty when the name has none.
        extension: String,
    },
    /// The file exceeds the byte limit.
    TooLarge {
        /// File size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        limit: u64,
    },
    /// The batch has more files than allowed.
    TooMany {
        /// Number of files offered.
        count: usize,
        /// Maximum batch size.
        limit: usize,
    },
}

impl std::fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadRejection::EmptyName => write!(f, "file name is empty"),
            UploadRejection::UnsupportedType { extension } => {
                if extension.is_empty() {
                    write!(f, "file has no extension")
                } else {
                    write!(f, "extension .{extension} is not accepted")
                }
            }
            UploadRejection::TooLarge { size, limit } => {
                write!(f, "file is {size} bytes, limit is {limit}")
            }
            UploadRejection::TooMany { count, limit } => {
                write!(f, "{count} files exceeds the limit of {limit}")
            }
        }
    }
}

impl std::error::Error for UploadRejection {}

/// Upload constraints: size cap, accepted extensions, batch cap.
///
/// An empty accept set accepts every file type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadPolicy {
    max_bytes: Option<u64>,
    accept: AHashSet<String>,
    max_files: Option<usize>,
}

impl UploadPolicy {
    /// Create a policy with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap individual file size in bytes (inclusive).
    #[must_use]
    pub const fn max_bytes(mut self, limit: u64) -> Self {
        self.max_bytes = Some(limit);
        self
    }

    /// Cap the number of files per batch (inclusive).
    #[must_use]
    pub const fn max_files(mut self, limit: usize) -> Self {
        self.max_files = Some(limit);
        self
    }

    /// Add accepted extensions.
    ///
    /// Entries are normalized: leading dots stripped, lowercased. Blank
    /// entries are ignored.
    #[must_use]
    pub fn accept<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in extensions {
            let normalized = entry.as_ref().trim_start_matches('.').to_ascii_lowercase();
            if !normalized.is_empty() {
                self.accept.insert(normalized);
            }
        }
        self
    }

    /// Whether an extension passes the accept set.
    #[must_use]
    pub fn is_accepted(&self, extension: &str) -> bool {
        self.accept.is_empty()
            || self
                .accept
                .contains(&extension.trim_start_matches('.').to_ascii_lowercase())
    }

    /// Check one file against the policy.
    ///
    /// Checks run in order: name, then type, then size, and the first
    /// failure wins.
    pub fn validate(&self, name: &str, bytes: u64) -> Result<(), UploadRejection> {
        if name.trim().is_empty() {
            return Err(UploadRejection::EmptyName);
        }
        if !self.accept.is_empty() {
            let extension = final_extension(name).unwrap_or("");
            if !self.accept.contains(&extension.to_ascii_lowercase()) {
                return Err(UploadRejection::UnsupportedType {
                    extension: extension.to_ascii_lowercase(),
                });
            }
        }
        if let Some(limit) = self.max_bytes
            && bytes > limit
        {
            return Err(UploadRejection::TooLarge { size: bytes, limit });
        }
        Ok(())
    }

    /// Check a batch of `(name, bytes)` files.
    ///
    /// The batch size is checked first, then each file in order; the
    /// first failure wins.
    pub fn validate_batch(&self, files: &[(&str, u64)]) -> Result<(), UploadRejection> {
        if let Some(limit) = self.max_files
            && files.len() > limit
        {
            return Err(UploadRejection::TooMany {
                count: files.len(),
                limit,
            });
        }
        for &(name, bytes) in files {
            self.validate(name, bytes)?;
        }
        Ok(())
    }
}

/// The final dot-suffix of a file name.
///
/// Dotfiles and trailing dots yield `None`.
fn final_extension(name: &str) -> Option<&str> {
    let (stem, extension) = name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension)
}
