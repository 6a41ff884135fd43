//! Core CLI commands for srclink: url, roles, render, apply, list.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error;
use crate::format::Format;
use crate::render;
use crate::revision::{BaseUrl, GitCli, Revision};
use crate::role::RoleRegistry;
use crate::scanner;

/// One role invocation as emitted by `list --json`.
#[derive(Serialize)]
struct ListedLink<'a> {
    /// Line of the invocation, one-based.
    line: u32,
    /// Full markup as written.
    raw: &'a str,
    /// Role name.
    role: &'a str,
    /// Documentation file, relative to the project root.
    source: &'a Path,
    /// Display text.
    text: &'a str,
    /// Resolved target URL.
    url: &'a str,
}

/// Rewrite every scanned documentation file in place with its roles expanded.
///
/// # Errors
///
/// Returns errors from config loading, file reading, or file writing.
pub fn apply(revision: Option<&str>) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let (_, registry) = build_registry(&root, &config, revision)?;

    // Render everything before writing anything, so a bad file leaves the tree untouched.
    let mut pending = Vec::new();
    for relative in scanner::doc_files(&root, &config) {
        let rendered = render::render_file(&root.join(&relative), &registry)?;
        if rendered.links > 0 {
            pending.push((relative, rendered));
        }
    }

    let mut total_links = 0_usize;
    for (relative, rendered) in &pending {
        let path = root.join(relative);
        std::fs::write(&path, &rendered.output)
            .map_err(|source| return error::Error::Write { path, source })?;
        tracing::info!(file = %relative.display(), links = rendered.links, "rewrote");
        total_links = total_links.saturating_add(rendered.links);
    }
    let changed_files = pending.len();

    eprintln!("Expanded {total_links} links in {changed_files} files");
    return Ok(());
}

/// Resolve the base URL and register the built-in and configured roles.
/// An explicit `revision` is used verbatim; otherwise `git` is asked.
///
/// # Errors
///
/// Returns `Error::InvalidPattern` if a configured role template is malformed.
pub fn build_registry(
    root: &Path,
    config: &Config,
    revision: Option<&str>,
) -> Result<(BaseUrl, RoleRegistry), error::Error> {
    let revision = match revision {
        None => Revision::resolve(&GitCli::new(&config.git, root)),
        Some(name) => Revision::fixed(name),
    };
    let base = BaseUrl::new(&config.repository, &revision);
    let registry = RoleRegistry::from_config(&base, &config.roles)?;
    return Ok((base, registry));
}

/// Print every known role invocation in the scanned documentation, with its target.
///
/// # Errors
///
/// Returns errors from config loading, scanning, or JSON serialization.
pub fn list(revision: Option<&str>, json: bool) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let (_, registry) = build_registry(&root, &config, revision)?;
    let refs = scanner::scan(&root, &config)?;

    let resolved: Vec<_> = refs
        .iter()
        .filter_map(|r| {
            return registry.render(&r.role, &r.raw, &r.text).map(|node| return (r, node));
        })
        .collect();

    if json {
        let listed: Vec<ListedLink<'_>> = resolved
            .iter()
            .map(|(r, node)| {
                return ListedLink {
                    line: r.source_line,
                    raw: &r.raw,
                    role: &r.role,
                    source: &r.source,
                    text: &node.text,
                    url: &node.url,
                };
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    for (r, node) in &resolved {
        println!("{}:{}  {} -> {}", r.source.display(), r.source_line, node.raw, node.url);
    }
    return Ok(());
}

/// Render one documentation file to stdout.
///
/// # Errors
///
/// Returns errors from config loading, format detection, or file reading.
pub fn render(file: &Path, revision: Option<&str>) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    // Fail on an unsupported extension before spending time on git.
    Format::for_path(file)?;
    let (_, registry) = build_registry(&root, &config, revision)?;

    let rendered = render::render_file(file, &registry)?;
    print!("{}", rendered.output);
    return Ok(());
}

/// Print each registered role and the URL pattern it expands to.
///
/// # Errors
///
/// Returns errors from config loading or role registration.
pub fn roles(revision: Option<&str>) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let (_, registry) = build_registry(&root, &config, revision)?;

    for (name, role) in registry.iter() {
        println!("{name:<12} {}", role.pattern);
    }
    return Ok(());
}

/// Print the base URL links are generated under.
///
/// # Errors
///
/// Returns errors from config loading or role registration.
pub fn url(revision: Option<&str>) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let (base, _) = build_registry(&root, &config, revision)?;
    println!("{base}");
    return Ok(());
}
