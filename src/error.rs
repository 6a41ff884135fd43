/// Crate-level error types for srclink diagnostics.
use std::path::PathBuf;

/// Errors from the tool surrounding the roles: config, file access, output format.
/// Revision lookups and role expansion never fail; they degrade to broken links instead.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A documentation file named on the command line does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// A configured role template does not contain exactly one `{text}` placeholder.
    #[error("invalid pattern for role `{role}`: `{pattern}` must contain `{{text}}` exactly once")]
    InvalidPattern {
        /// The template as written in the config.
        pattern: String,
        /// Role name the template was given for.
        role: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization failed.
    #[error("json serialize: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// A documentation file exists but could not be read, or is not UTF-8.
    #[error("read {}: {source}", path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// No link syntax known for this file extension.
    #[error("no link format for extension: .{ext}")]
    UnsupportedFormat {
        /// File extension without the leading dot.
        ext: String,
    },

    /// A rendered documentation file could not be written back.
    #[error("write {}: {source}", path.display())]
    Write {
        /// File that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
