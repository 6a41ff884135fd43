//! Revision resolution: which commit or tag the generated links point at.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Strip surrounding whitespace, then at most one leading `v`.
/// `"v4.2\n"` becomes `"4.2"`, `"vv1.0"` becomes `"v1.0"`.
pub fn trim_revision(raw: &str) -> String {
    let trimmed = raw.trim();
    return trimmed.strip_prefix('v').unwrap_or(trimmed).to_owned();
}

/// Source of the two pieces of revision metadata.
/// Both methods return raw standard output; an empty string means "nothing".
pub trait VersionControl {
    /// Tag naming the checked-out commit exactly, if any.
    fn exact_tag(&self) -> String;
    /// Abbreviated id of the checked-out commit.
    fn short_head(&self) -> String;
}

/// `VersionControl` backed by the `git` command line, run in a project root.
#[derive(Debug)]
pub struct GitCli {
    /// Working directory the commands run in.
    dir: PathBuf,
    /// Program to invoke, normally `git`.
    program: String,
}

impl GitCli {
    /// Create a client running `program` inside `dir`.
    pub fn new(program: &str, dir: &Path) -> Self {
        return Self {
            dir: dir.to_path_buf(),
            program: program.to_owned(),
        };
    }

    /// Run one command and return its standard output.
    /// Output is kept even on a non-zero exit; a spawn failure yields an empty string.
    fn stdout_of(&self, args: &[&str]) -> String {
        let output = match Command::new(&self.program).args(args).current_dir(&self.dir).output() {
            Err(e) => {
                tracing::warn!(program = %self.program, ?args, "failed to run: {e}");
                return String::new();
            },
            Ok(output) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(
                program = %self.program,
                ?args,
                status = %output.status,
                stderr = %stderr.trim(),
                "command exited unsuccessfully"
            );
        }

        return String::from_utf8_lossy(&output.stdout).into_owned();
    }
}

impl VersionControl for GitCli {
    fn exact_tag(&self) -> String {
        return self.stdout_of(&["describe", "--exact-match"]);
    }

    fn short_head(&self) -> String {
        return self.stdout_of(&["rev-parse", "--short", "HEAD"]);
    }
}

/// The documented source state: a short commit id, optionally named by a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Trimmed short commit id. Empty when the lookup failed.
    pub commit: String,
    /// Trimmed exact-match tag, present only when non-empty.
    pub tag: Option<String>,
}

impl Revision {
    /// A revision given explicitly, used verbatim without asking version control.
    pub fn fixed(name: &str) -> Self {
        return Self {
            commit: name.to_owned(),
            tag: None,
        };
    }

    /// The component placed in URLs: the tag if there is one, else the commit id.
    pub fn name(&self) -> &str {
        return self.tag.as_deref().unwrap_or(&self.commit);
    }

    /// Ask version control for the commit id and exact tag.
    /// Never fails: an unavailable tool leaves the commit empty and logs a warning.
    pub fn resolve(vcs: &dyn VersionControl) -> Self {
        let commit = trim_revision(&vcs.short_head());
        if commit.is_empty() {
            tracing::warn!("could not determine commit id; links will have an empty revision");
        } else {
            tracing::info!(commit = %commit, "git commit id");
        }

        let tag = Some(trim_revision(&vcs.exact_tag())).filter(|t| return !t.is_empty());
        if let Some(t) = &tag {
            tracing::info!(tag = %t, "git tag");
        }

        return Self { commit, tag };
    }
}

/// Root URL every role pattern hangs off: `<repository>/tree/<revision>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(
    /// The URL, always ending in `/`.
    String,
);

impl BaseUrl {
    /// The URL as a string slice.
    pub fn as_str(&self) -> &str {
        return &self.0;
    }

    /// Build the base URL for `revision` inside `repository`.
    pub fn new(repository: &str, revision: &Revision) -> Self {
        let repository = repository.trim_end_matches('/');
        return Self(format!("{repository}/tree/{}/", revision.name()));
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(self.as_str());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;
    use crate::config::DEFAULT_REPOSITORY;

    struct StubVcs {
        head: &'static str,
        tag: &'static str,
    }

    impl VersionControl for StubVcs {
        fn exact_tag(&self) -> String {
            return self.tag.to_owned();
        }

        fn short_head(&self) -> String {
            return self.head.to_owned();
        }
    }

    fn base_for(head: &'static str, tag: &'static str) -> String {
        let revision = Revision::resolve(&StubVcs { head, tag });
        return BaseUrl::new(DEFAULT_REPOSITORY, &revision).to_string();
    }

    #[test]
    fn commit_without_tag() {
        assert_eq!(
            base_for("a1b2c3d\n", ""),
            "https://github.com/espressif/esp-idf/tree/a1b2c3d/"
        );
    }

    #[test]
    fn tag_overrides_commit_and_loses_leading_v() {
        assert_eq!(
            base_for("a1b2c3d\n", "v4.2\n"),
            "https://github.com/espressif/esp-idf/tree/4.2/"
        );
    }

    #[test]
    fn whitespace_only_tag_is_no_tag() {
        let revision = Revision::resolve(&StubVcs { head: "a1b2c3d", tag: " \n" });
        assert_eq!(revision.tag, None);
        assert_eq!(revision.name(), "a1b2c3d");
    }

    #[test]
    fn failed_lookup_gives_empty_segment() {
        assert_eq!(base_for("", ""), "https://github.com/espressif/esp-idf/tree//");
    }

    #[test]
    fn strips_only_one_leading_v() {
        assert_eq!(trim_revision("vv1.0"), "v1.0");
        assert_eq!(trim_revision("  v3.3.1 \n"), "3.3.1");
        assert_eq!(trim_revision("1.0v"), "1.0v");
        assert_eq!(trim_revision("release-v5"), "release-v5");
    }

    #[test]
    fn fixed_revision_is_verbatim() {
        let revision = Revision::fixed("v5.0");
        assert_eq!(
            BaseUrl::new("https://example.com/o/r/", &revision).as_str(),
            "https://example.com/o/r/tree/v5.0/"
        );
    }

    #[test]
    fn missing_program_yields_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new("srclink-no-such-program", dir.path());
        assert_eq!(git.short_head(), "");
        assert_eq!(git.exact_tag(), "");
    }
}
