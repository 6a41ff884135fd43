//! Expansion of role invocations into hyperlinks.

use std::path::Path;

use regex::Captures;

use crate::error::Error;
use crate::format::Format;
use crate::role::RoleRegistry;
use crate::scanner::{ROLE_PATTERN, read_doc};

/// Output of rendering one document.
#[derive(Debug, PartialEq, Eq)]
pub struct Rendered {
    /// Number of role invocations replaced by links.
    pub links: usize,
    /// The document with known roles expanded.
    pub output: String,
}

/// Replace every known role invocation outside code with a link.
/// Unknown roles and all other bytes, line endings included, are kept as written.
pub fn render_content(content: &str, format: Format, registry: &RoleRegistry) -> Rendered {
    let code = format.code_ranges(content);
    let mut links = 0_usize;

    let output = ROLE_PATTERN.replace_all(content, |cap: &Captures<'_>| {
        let Some(whole) = cap.get(0) else {
            return String::new();
        };
        let raw = whole.as_str();
        if code.contains(whole.start()) {
            return raw.to_owned();
        }
        let name = cap.get(1).map_or("", |m| return m.as_str());
        let text = cap.get(2).map_or("", |m| return m.as_str());
        let Some(node) = registry.render(name, raw, text) else {
            tracing::debug!(role = name, "unknown role left as written");
            return raw.to_owned();
        };
        links = links.saturating_add(1);
        return format.link(&node);
    });

    return Rendered { links, output: output.into_owned() };
}

/// Read a documentation file and render it in the format its extension implies.
///
/// # Errors
///
/// Returns `Error::UnsupportedFormat` for an unknown extension,
/// `Error::FileNotFound` if the file does not exist, or `Error::Read` for other read failures.
pub fn render_file(path: &Path, registry: &RoleRegistry) -> Result<Rendered, Error> {
    let format = Format::for_path(path)?;
    let content = read_doc(path)?;
    return Ok(render_content(&content, format, registry));
}
