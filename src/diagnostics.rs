use crate::config::CONFIG_FILE;
use crate::error::Error;

/// ANSI bold, used for Markdown headings on a terminal.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is one, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::FileNotFound { path } => format!("\
# Error: File Not Found

`{}` does not exist.
", path.display()),

        Error::InvalidPattern { role, pattern } => render_invalid_pattern(role, pattern),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::Json(e) => format!("\
# Error: JSON Serialization

{e}
"),

        Error::Read { path, source } => format!("\
# Error: Read Failed

Could not read `{}`: {source}

Documentation files must be readable UTF-8 text. `apply` rewrites nothing when any file fails to read.
", path.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

`{CONFIG_FILE}` could not be parsed:

{e}
"),

        Error::UnsupportedFormat { ext } => render_unsupported_format(ext),

        Error::Write { path, source } => format!("\
# Error: Write Failed

Could not write `{}`: {source}
", path.display()),
    };
}

/// Diagnostic for a role template without a single `{text}` placeholder.
fn render_invalid_pattern(role: &str, pattern: &str) -> String {
    return format!(
        "\
# Error: Invalid Role Pattern

Role `{role}` is configured as `{pattern}`, which does not contain `{{text}}` exactly once.

## Fix

Edit `[roles]` in `{CONFIG_FILE}` so the template has one placeholder:

    [roles]
    {role} = \"path/to/{{text}}\"
"
    );
}

/// Diagnostic for a file whose extension has no link syntax.
fn render_unsupported_format(ext: &str) -> String {
    return format!(
        "\
# Error: Unsupported Format

No link syntax for `.{ext}` files.

## Supported extensions

- `.md`, `.markdown`: Markdown
- `.rst`: reStructuredText
"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_shows_fix() {
        let md = render_error(&Error::InvalidPattern {
            pattern: "components/".to_owned(),
            role: "header".to_owned(),
        });
        assert!(md.starts_with("# Error: Invalid Role Pattern"));
        assert!(md.contains("header = \"path/to/{text}\""));
    }

    #[test]
    fn read_failure_names_the_file() {
        let md = render_error(&Error::Read {
            path: std::path::PathBuf::from("docs/b.md"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        });
        assert!(md.starts_with("# Error: Read Failed"));
        assert!(md.contains("`docs/b.md`"));
        assert!(md.contains("rewrites nothing"));
    }

    #[test]
    fn unsupported_format_lists_extensions() {
        let md = render_error(&Error::UnsupportedFormat { ext: "c".to_owned() });
        assert!(md.contains("`.c`"));
        assert!(md.contains("`.rst`"));
    }
}
