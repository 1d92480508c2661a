//! Minimal element selectors used to locate page regions.

use crate::error::SelectorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A single simple selector: `.class`, `#id`, or a bare tag name.
///
/// Compound and descendant selectors are not supported; region lookup only ever
/// needs one of these three forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Class(String),
    Id(String),
    Tag(String),
}

impl Selector {
    /// Parse a selector string.
    ///
    /// - `.doc-content` → [`Selector::Class`]
    /// - `#search-results` → [`Selector::Id`]
    /// - `article` → [`Selector::Tag`] (lower-cased)
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        let selector = if let Some(rest) = input.strip_prefix('.') {
            Self::Class(rest.to_string())
        } else if let Some(rest) = input.strip_prefix('#') {
            Self::Id(rest.to_string())
        } else {
            Self::Tag(input.to_ascii_lowercase())
        };

        let name = match &selector {
            Self::Class(name) | Self::Id(name) | Self::Tag(name) => name,
        };
        if name.is_empty() || !name.chars().all(is_name_char) {
            return Err(SelectorError::Unsupported(input.to_string()));
        }

        Ok(selector)
    }

    /// Check whether an element with the given tag, id and class list matches.
    pub(crate) fn matches(&self, tag: &str, id: Option<&str>, class: Option<&str>) -> bool {
        match self {
            Self::Tag(name) => tag.eq_ignore_ascii_case(name),
            Self::Id(name) => id == Some(name.as_str()),
            Self::Class(name) => class.is_some_and(|c| c.split_ascii_whitespace().any(|c| c == name)),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, ".{}", name),
            Self::Id(name) => write!(f, "#{}", name),
            Self::Tag(name) => f.write_str(name),
        }
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
