use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;
use crate::format::{Format, is_doc_file};
use crate::types::RoleRef;

/// Inline role syntax: `:name:` followed by backtick-quoted text (possibly empty, single line).
#[allow(clippy::expect_used, reason = "hardcoded regex is a compile-time invariant")]
pub static ROLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r":([A-Za-z][A-Za-z0-9_-]*):`([^`\n]*)`").expect("valid regex");
});

/// List documentation files under `root`, relative to it, sorted.
/// Applies the config's include/exclude filters.
pub fn doc_files(root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| return !is_hidden_dir(e))
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file() && is_doc_file(e.path()))
        .map(|e| return e.path().strip_prefix(root).unwrap_or(e.path()).to_path_buf())
        .filter(|relative| return config.should_scan(&relative.to_string_lossy()))
        .collect();
    files.sort();
    return files;
}

/// Skip `.git` and other dot-directories below the root.
fn is_hidden_dir(entry: &walkdir::DirEntry) -> bool {
    return entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_string_lossy().starts_with('.');
}

/// Read a documentation file, naming it in any error.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if the file does not exist, or `Error::Read`
/// for any other failure, including content that is not UTF-8.
pub fn read_doc(path: &Path) -> Result<String, Error> {
    return match std::fs::read_to_string(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::FileNotFound { path: path.to_path_buf() })
        },
        Err(source) => Err(Error::Read { path: path.to_path_buf(), source }),
        Ok(c) => Ok(c),
    };
}

/// Scan all documentation files under `root` and extract role invocations.
/// Results are ordered by file, then line.
///
/// # Errors
///
/// Returns `Error::Read` if any documentation file cannot be read.
pub fn scan(root: &Path, config: &Config) -> Result<Vec<RoleRef>, Error> {
    let mut refs = Vec::new();

    for relative in doc_files(root, config) {
        let format = Format::for_path(&relative)?;
        let content = read_doc(&root.join(&relative))?;
        tracing::debug!(file = %relative.display(), "scanning");
        extract_role_refs(&content, &relative, format, &mut refs);
    }

    return Ok(refs);
}

/// Extract every `:role:`text`` invocation that does not start inside code.
pub fn extract_role_refs(content: &str, source: &Path, format: Format, refs: &mut Vec<RoleRef>) {
    let code = format.code_ranges(content);
    let mut line = 1_usize;
    let mut scanned_to = 0_usize;

    for cap in ROLE_PATTERN.captures_iter(content) {
        let start = cap.get(0).map_or(0, |m| return m.start());
        let newlines = content.get(scanned_to..start).map_or(0, |s| return s.matches('\n').count());
        line = line.saturating_add(newlines);
        scanned_to = start;

        if code.contains(start) {
            continue;
        }
        let source_line = u32::try_from(line).unwrap_or(u32::MAX);
        refs.push(role_ref_from_capture(&cap, source, source_line));
    }
}

/// Build a reference from one regex capture.
fn role_ref_from_capture(cap: &Captures<'_>, source: &Path, line: u32) -> RoleRef {
    let field = |i: usize| return cap.get(i).map_or("", |m| return m.as_str()).to_owned();
    return RoleRef {
        raw: field(0),
        role: field(1),
        source: source.to_path_buf(),
        source_line: line,
        text: field(2),
    };
}
