use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE: &str = ".srclink.toml";

/// Hosting repository links point into when the config names none.
pub const DEFAULT_REPOSITORY: &str = "https://github.com/espressif/esp-idf";

/// Project configuration loaded from `.srclink.toml`.
/// Include/exclude patterns are path prefixes applied to documentation files.
#[derive(Debug)]
pub struct Config {
    /// Path prefixes of documentation files to skip.
    exclude: Vec<String>,
    /// Program invoked for revision lookups.
    pub git: String,
    /// Path prefixes of documentation files to scan. Empty means everything.
    include: Vec<String>,
    /// Repository URL without a trailing slash.
    pub repository: String,
    /// Extra roles: name to template relative to the base URL.
    pub roles: BTreeMap<String, String>,
}

/// Raw TOML structure for `.srclink.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SrclinkTomlConfig {
    /// See [`Config::exclude`].
    #[serde(default)]
    exclude: Vec<String>,
    /// See [`Config::git`].
    git: Option<String>,
    /// See [`Config::include`].
    #[serde(default)]
    include: Vec<String>,
    /// See [`Config::repository`].
    repository: Option<String>,
    /// See [`Config::roles`].
    #[serde(default)]
    roles: BTreeMap<String, String>,
}

impl Config {
    /// Load config from `.srclink.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist. A file that exists but
    /// is malformed is an error, never a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: SrclinkTomlConfig = toml::from_str(content)?;
        let repository = raw.repository.unwrap_or_else(|| return DEFAULT_REPOSITORY.to_owned());
        return Ok(Self {
            exclude: raw.exclude,
            git: raw.git.unwrap_or_else(|| return "git".to_owned()),
            include: raw.include,
            repository: repository.trim_end_matches('/').to_owned(),
            roles: raw.roles,
        });
    }

    /// Check whether a documentation file path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}

impl Default for Config {
    /// Link into the default repository, scan everything, no extra roles.
    fn default() -> Self {
        return Self {
            exclude: Vec::new(),
            git: "git".to_owned(),
            include: Vec::new(),
            repository: DEFAULT_REPOSITORY.to_owned(),
            roles: BTreeMap::new(),
        };
    }
}
