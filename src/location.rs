use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::NavigationError;

/// Key the routing runtime assigns to the location the session started on.
pub const DEFAULT_KEY: &str = "default";

// Only used to resolve relative paths, never shows up in a recorded path.
const RESOLVE_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum NavigationType {
    Push,
    Replace,
    Pop,
}

impl NavigationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationType::Push => "PUSH",
            NavigationType::Replace => "REPLACE",
            NavigationType::Pop => "POP",
        }
    }
}

impl fmt::Display for NavigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NavigationType {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUSH" => Ok(NavigationType::Push),
            "REPLACE" => Ok(NavigationType::Replace),
            "POP" => Ok(NavigationType::Pop),
            _ => Err(NavigationError::UnexpectedNavigationType(s.to_string())),
        }
    }
}

impl TryFrom<String> for NavigationType {
    type Error = NavigationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub key: String,
    pub pathname: String,
    pub search: String,
}

impl Location {
    pub fn new(
        key: impl Into<String>,
        pathname: impl Into<String>,
        search: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            pathname: pathname.into(),
            search: search.into(),
        }
    }

    /// Builds a location from either a full URL or an app-relative path such
    /// as `/manga/5?tab=chapters`. Fragments are dropped, dot segments are
    /// resolved and an empty `?` yields an empty search.
    pub fn parse(key: impl Into<String>, input: &str) -> Result<Self, NavigationError> {
        let invalid = |reason: String| NavigationError::InvalidUrl {
            url: input.to_string(),
            reason,
        };

        let base = Url::parse(RESOLVE_BASE).map_err(|e| invalid(e.to_string()))?;
        let url = base.join(input.trim()).map_err(|e| invalid(e.to_string()))?;

        let search = match url.query() {
            Some(query) if !query.is_empty() => format!("?{}", query),
            _ => String::new(),
        };

        Ok(Self::new(key, url.path(), search))
    }

    pub fn path(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

/// One notification from the routing runtime, as it appears on the wire.
///
/// Either `pathname` (with optional `search`) or `url` describes where the
/// navigation landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(alias = "type", alias = "navigationType")]
    pub action: NavigationType,
}

impl NavigationEvent {
    pub fn location(&self) -> Result<Location, NavigationError> {
        match (&self.pathname, &self.url) {
            // Same normalisation as the url form, so both spellings of a
            // location record the same path.
            (Some(pathname), _) => Location::parse(
                self.key.clone(),
                &format!("{}{}", pathname, self.search.as_deref().unwrap_or_default()),
            ),
            (None, Some(url)) => Location::parse(self.key.clone(), url),
            (None, None) => Err(NavigationError::MissingLocation),
        }
    }
}
