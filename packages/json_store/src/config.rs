//! Store location configuration.

use std::path::PathBuf;

use prefkit_core_store::Scope;
use thiserror::Error;

/// Environment variable overriding the persistence domain.
pub const DOMAIN_ENV: &str = "PREFKIT_DOMAIN";

/// Environment variable overriding the directory holding domain documents.
pub const HOME_ENV: &str = "PREFKIT_HOME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory on this platform; set PREFKIT_HOME")]
    NoConfigDir,
}

/// Where a disk-backed store keeps its entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// The persistence domain, e.g. `com.example.app`.
    pub domain: String,
    /// Directory holding one `<domain>.json` document per domain.
    pub root: PathBuf,
}

impl StoreConfig {
    pub fn new(domain: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            domain: domain.into(),
            root: root.into(),
        }
    }

    /// Resolve the configuration from the process environment.
    ///
    /// `PREFKIT_DOMAIN` replaces `default_domain` and `PREFKIT_HOME` replaces
    /// the platform config directory (`~/.config/prefkit` on Linux).
    pub fn from_env(default_domain: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(default_domain, |name| std::env::var(name).ok())
    }

    /// Resolve the configuration with a custom variable lookup.
    pub fn from_lookup(
        default_domain: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let domain = lookup(DOMAIN_ENV)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| default_domain.to_string());

        let root = match lookup(HOME_ENV).filter(|h| !h.is_empty()) {
            Some(home) => PathBuf::from(home),
            None => dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join("prefkit"),
        };

        Ok(Self { domain, root })
    }

    /// The document holding the active domain's entries.
    pub fn document_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.domain))
    }

    /// The scope naming the active domain, for bulk removal.
    pub fn scope(&self) -> Scope {
        Scope::named(self.domain.clone())
    }
}
