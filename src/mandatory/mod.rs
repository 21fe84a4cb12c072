//! Mandatory default directives
//!
//! Every rendered composite is backfilled with a baseline set of kickstart
//! directives. Each directive wraps as an unnamed compact fragment, so the
//! regular conflict check drops any default the user content already covers
//! (a composite carrying `rootpw secret` never receives `rootpw anaconda`).

use serde::{Deserialize, Serialize};

use crate::fragment::Fragment;

/// Base directive bodies, in output order
const BASE_DIRECTIVES: &[&str] = &[
    "autopart",
    "bootloader --location=mbr",
    "clearpart --all --initlabel",
    "keyboard us",
    "lang en_US.UTF-8",
    "network --bootproto dhcp",
    "%packages --default\n%end",
    "rootpw anaconda",
    "selinux --enforcing",
    "timezone America/New_York",
    "zerombr",
];

/// An ordered set of mandatory default directive bodies
#[derive(Debug, Clone)]
pub struct MandatorySet {
    directives: Vec<String>,
}

impl MandatorySet {
    /// The standard default set.
    pub fn standard() -> Self {
        Self {
            directives: BASE_DIRECTIVES.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    /// A set with no directives; rendering with it injects nothing.
    pub fn empty() -> Self {
        Self {
            directives: Vec::new(),
        }
    }

    /// The set for a given version.
    ///
    /// Every version currently maps to the standard set; the parameter is
    /// the seam for version-specific defaults.
    pub fn for_version(_version: Option<&str>) -> Self {
        Self::standard()
    }

    /// Append extra mandatory directive bodies, e.g. `"reboot"`.
    pub fn with_extras<I, S>(mut self, extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives.extend(extras.into_iter().map(Into::into));
        self
    }

    /// Build the set described by a [`MandatoryConfig`].
    pub fn from_config(config: &MandatoryConfig) -> Self {
        Self::for_version(config.version.as_deref()).with_extras(config.extra.iter().cloned())
    }

    /// Directive bodies in order.
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// Wrap each directive as an unnamed compact fragment.
    pub(crate) fn fragments(&self) -> Vec<Fragment> {
        self.directives
            .iter()
            .map(|body| Fragment::unnamed(body.clone()))
            .collect()
    }
}

impl Default for MandatorySet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Mandatory-set configuration, typically parsed from TOML text
///
/// ```toml
/// version = "f42"
/// extra = ["reboot"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MandatoryConfig {
    /// Selects the mandatory-default set
    #[serde(default)]
    pub version: Option<String>,

    /// Extra directive bodies appended to the base list
    #[serde(default)]
    pub extra: Vec<String>,
}

impl MandatoryConfig {
    /// Parse from TOML text. The caller supplies the text; this crate does
    /// no file I/O.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Mandatory-config parse errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text did not parse or did not match the schema
    #[error("invalid mandatory config: {0}")]
    Parse(#[from] toml::de::Error),
}
