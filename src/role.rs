//! Link roles: named inline markup that turns literal text into a source-tree link.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;
use crate::revision::BaseUrl;
use crate::types::LinkNode;

/// Placeholder replaced by the role's literal text.
pub const PLACEHOLDER: &str = "{text}";

/// Roles every registry starts with: name and template relative to the base URL.
pub const DEFAULT_ROLES: [(&str, &str); 3] = [
    ("tree", "{text}"),
    ("component", "components/{text}"),
    ("example", "examples/{text}"),
];

/// A URL template with exactly one placeholder, split around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    /// Everything before the placeholder.
    prefix: String,
    /// Everything after the placeholder.
    suffix: String,
}

impl UrlPattern {
    /// Substitute `text` for the placeholder. No escaping or validation.
    pub fn expand(&self, text: &str) -> String {
        return format!("{}{text}{}", self.prefix, self.suffix);
    }

    /// The same pattern with `base` prepended, placeholder untouched.
    pub fn under(self, base: &BaseUrl) -> Self {
        return Self {
            prefix: format!("{base}{}", self.prefix),
            suffix: self.suffix,
        };
    }

    /// Split a template around its placeholder.
    /// Returns `None` unless `{text}` occurs exactly once.
    pub fn parse(template: &str) -> Option<Self> {
        let (prefix, suffix) = template.split_once(PLACEHOLDER)?;
        if suffix.contains(PLACEHOLDER) {
            return None;
        }
        return Some(Self {
            prefix: prefix.to_owned(),
            suffix: suffix.to_owned(),
        });
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}{PLACEHOLDER}{}", self.prefix, self.suffix);
    }
}

/// Produces a link node from the literal text of a role invocation.
pub trait RenderLink {
    /// Build the node for `:name:`text``, where `raw` is the full markup.
    fn render(&self, raw: &str, text: &str) -> LinkNode;
}

/// A role bound to one URL pattern at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRole {
    /// Pattern the role's text is substituted into.
    pub pattern: UrlPattern,
}

impl RenderLink for LinkRole {
    fn render(&self, raw: &str, text: &str) -> LinkNode {
        return LinkNode {
            raw: raw.to_owned(),
            text: text.to_owned(),
            url: self.pattern.expand(text),
        };
    }
}

/// The set of roles the renderer recognises, keyed by name.
#[derive(Debug, Default)]
pub struct RoleRegistry {
    /// Registered roles, ordered by name.
    roles: BTreeMap<String, LinkRole>,
}

impl RoleRegistry {
    /// Register `tree`, `component` and `example`, then any extra roles.
    /// Extra roles are templates relative to `base` and replace defaults of the same name.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if an extra template lacks exactly one `{text}`.
    pub fn from_config(base: &BaseUrl, extra: &BTreeMap<String, String>) -> Result<Self, Error> {
        let mut registry = Self::with_defaults(base);
        for (name, template) in extra {
            let Some(relative) = UrlPattern::parse(template) else {
                return Err(Error::InvalidPattern {
                    pattern: template.clone(),
                    role: name.clone(),
                });
            };
            registry.register(name, LinkRole { pattern: relative.under(base) });
        }
        return Ok(registry);
    }

    /// Look up a role by name.
    pub fn get(&self, name: &str) -> Option<&LinkRole> {
        return self.roles.get(name);
    }

    /// Iterate over `(name, role)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkRole)> {
        return self.roles.iter().map(|(name, role)| return (name.as_str(), role));
    }

    /// Attach `role` under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: &str, role: LinkRole) {
        if self.roles.insert(name.to_owned(), role).is_some() {
            tracing::debug!(role = name, "role re-registered");
        }
    }

    /// Render one invocation, or `None` if no role of that name is registered.
    pub fn render(&self, name: &str, raw: &str, text: &str) -> Option<LinkNode> {
        return self.get(name).map(|role| return role.render(raw, text));
    }

    /// Registry holding only the three built-in roles.
    pub fn with_defaults(base: &BaseUrl) -> Self {
        let mut registry = Self::default();
        for (name, template) in DEFAULT_ROLES {
            let pattern = UrlPattern {
                prefix: template.trim_end_matches(PLACEHOLDER).to_owned(),
                suffix: String::new(),
            };
            registry.register(name, LinkRole { pattern: pattern.under(base) });
        }
        return registry;
    }
}
