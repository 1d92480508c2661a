//! Site configuration loaded from TOML.
//!
//! Every field has a default matching the stock documentation theme, so an absent or
//! partial config file is always valid:
//!
//! ```toml
//! [search]
//! content_selector = ".api-doc-article"
//! max_results = 10
//!
//! [toc]
//! content_selector = ".doc-content"
//! levels = [2, 3]
//! ```

use crate::error::ConfigError;
use crate::page::Selector;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir.
const CONFIG_DIR_NAME: &str = "docsite-search";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub search: SearchSettings,
    pub toc: TocSettings,
    pub sidebar: SidebarSettings,
}

/// In-page search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    /// Region whose headings and text blocks are indexed.
    pub content_selector: Selector,
    /// Deepest heading level indexed (`h1`..`hN`).
    pub max_heading_level: u8,
    /// Queries shorter than this (in characters, after trimming) hide the results.
    pub min_query_chars: usize,
    pub max_results: usize,
    /// How long a selected result stays highlighted.
    pub highlight_ms: u64,
    pub highlight_color: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            content_selector: Selector::Class("api-doc-article".to_string()),
            max_heading_level: 4,
            min_query_chars: 2,
            max_results: 10,
            highlight_ms: 2000,
            highlight_color: "#fff3cd".to_string(),
        }
    }
}

/// Table-of-contents settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TocSettings {
    pub content_selector: Selector,
    /// Heading levels mirrored into the table of contents.
    pub levels: Vec<u8>,
    /// Element id of the container the links are written into.
    pub container_id: String,
}

impl Default for TocSettings {
    fn default() -> Self {
        Self {
            content_selector: Selector::Class("doc-content".to_string()),
            levels: vec![2, 3],
            container_id: "tableOfContents".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarSettings {
    pub section_selector: Selector,
    pub item_selector: Selector,
    pub debounce_ms: u64,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            section_selector: Selector::Class("nav-section".to_string()),
            item_selector: Selector::Class("nav-item".to_string()),
            debounce_ms: 300,
        }
    }
}

impl SiteConfig {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one, the default location
    /// (`<config dir>/docsite-search/config.toml`) is used when present, and built-in
    /// defaults otherwise.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => PathBuf::from(expand_tilde(path).as_ref()),
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would make the pages unsearchable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.search.max_heading_level) {
            return Err(ConfigError::Invalid {
                field: "search.max_heading_level",
                reason: format!("{} is not a heading level (1-6)", self.search.max_heading_level),
            });
        }
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid {
                field: "search.max_results",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(level) = self.toc.levels.iter().find(|l| !(1..=6).contains(*l)) {
            return Err(ConfigError::Invalid {
                field: "toc.levels",
                reason: format!("{} is not a heading level (1-6)", level),
            });
        }
        Ok(())
    }
}

/// Default config file location, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
