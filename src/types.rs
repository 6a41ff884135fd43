/// Core domain types for srclink role invocations and the links they produce.
use std::path::PathBuf;

/// A hyperlink produced by one role invocation.
/// Immutable once built; the renderer turns it into format-specific syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNode {
    /// Full markup the node replaces, e.g. ``:component:`bt` ``.
    pub raw: String,
    /// Display text, the literal text between the backticks.
    pub text: String,
    /// Resolved target URL.
    pub url: String,
}

/// A role invocation found in a documentation file.
#[derive(Debug, Clone)]
pub struct RoleRef {
    /// Full markup as written.
    pub raw: String,
    /// Role name between the colons.
    pub role: String,
    /// Documentation file containing the invocation.
    pub source: PathBuf,
    /// One-based line number in the source file.
    pub source_line: u32,
    /// Text between the backticks, possibly empty.
    pub text: String,
}
