/// Documentation formats and their native hyperlink syntax, chosen by file extension.
use std::path::Path;

use crate::error::Error;
use crate::markdown::CodeRanges;
use crate::types::LinkNode;

/// Markup language of a documentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// CommonMark-style Markdown: `[text](url)`.
    Markdown,
    /// reStructuredText: anonymous hyperlink reference.
    Rst,
}

impl Format {
    /// Map a file extension to its format.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedFormat` for unknown extensions.
    pub fn for_path(path: &Path) -> Result<Self, Error> {
        let ext = path.extension().and_then(|e| return e.to_str()).unwrap_or("");

        return match ext {
            "markdown" | "md" => Ok(Self::Markdown),
            "rst" => Ok(Self::Rst),
            _ => Err(Error::UnsupportedFormat {
                ext: ext.to_owned(),
            }),
        };
    }

    /// Byte ranges of `content` where role markup is literal code.
    /// reStructuredText literal blocks are not detected.
    pub fn code_ranges(self, content: &str) -> CodeRanges {
        return match self {
            Self::Markdown => CodeRanges::parse(content),
            Self::Rst => CodeRanges::default(),
        };
    }

    /// Write a link node in this format's syntax.
    /// Display text is escaped for the link syntax; the URL is written as resolved.
    pub fn link(self, node: &LinkNode) -> String {
        return match self {
            Self::Markdown => format!("[{}]({})", escape(&node.text, &['\\', '[', ']']), node.url),
            Self::Rst => format!("`{} <{}>`__", escape(&node.text, &['\\', '<', '>']), node.url),
        };
    }
}

/// Backslash-escape each of `special` in `text`.
fn escape(text: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if special.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    return out;
}

/// Whether a path names a documentation file srclink can render.
pub fn is_doc_file(path: &Path) -> bool {
    return Format::for_path(path).is_ok();
}
