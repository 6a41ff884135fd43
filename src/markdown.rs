//! Markdown structure needed by the renderer: where the code is.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

/// Byte ranges of code blocks and inline code spans in a document.
/// Role markup starting inside one of these is literal text, not a link.
#[derive(Debug, Default)]
pub struct CodeRanges {
    /// Ranges in document order.
    ranges: Vec<Range<usize>>,
}

impl CodeRanges {
    /// Whether byte offset `pos` falls inside any code range.
    pub fn contains(&self, pos: usize) -> bool {
        return self.ranges.iter().any(|r| return r.contains(&pos));
    }

    /// Parse `content` as CommonMark and collect its fenced, indented and inline code.
    pub fn parse(content: &str) -> Self {
        let ranges = Parser::new_ext(content, Options::empty())
            .into_offset_iter()
            .filter_map(|(event, range)| {
                return match event {
                    Event::Code(_) | Event::Start(Tag::CodeBlock(_)) => Some(range),
                    _ => None,
                };
            })
            .collect();
        return Self { ranges };
    }
}
