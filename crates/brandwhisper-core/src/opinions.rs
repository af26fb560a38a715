use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// One forum post matching a search query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opinion {
    pub title: String,
    /// Provider-assigned popularity (Reddit upvote score).
    pub score: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Which communities a search covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A single community, e.g. `nike`.
    Community(String),
    /// Every community on the site.
    All,
}

impl Scope {
    /// Parse a user-supplied community name. `all` (any case) and a blank
    /// string both mean a site-wide search; a leading `r/` is stripped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let name = raw.trim();
        let name = name
            .strip_prefix("r/")
            .or_else(|| name.strip_prefix("/r/"))
            .unwrap_or(name);
        if name.is_empty() || name.eq_ignore_ascii_case("all") {
            Scope::All
        } else {
            Scope::Community(name.to_string())
        }
    }

    /// The path segment used by the search endpoint (`all` for site-wide).
    #[must_use]
    pub fn as_path_segment(&self) -> &str {
        match self {
            Scope::Community(name) => name,
            Scope::All => "all",
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Scope::All)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordering requested from the search provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Relevance,
    Hot,
    New,
}

impl SortMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::Hot => "hot",
            SortMode::New => "new",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortMode::Relevance),
            "hot" => Ok(SortMode::Hot),
            "new" => Ok(SortMode::New),
            other => Err(format!(
                "unknown sort mode '{other}' (expected relevance, hot, or new)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_all_is_case_insensitive() {
        assert_eq!(Scope::parse("ALL"), Scope::All);
        assert_eq!(Scope::parse(""), Scope::All);
    }

    #[test]
    fn scope_strips_subreddit_prefix() {
        assert_eq!(Scope::parse("r/nike"), Scope::Community("nike".to_string()));
        assert_eq!(Scope::parse("/r/nike"), Scope::Community("nike".to_string()));
    }

    #[test]
    fn scope_serializes_as_plain_string() {
        let json = serde_json::to_string(&Scope::Community("nike".to_string())).unwrap();
        assert_eq!(json, "\"nike\"");
        assert_eq!(serde_json::to_string(&Scope::All).unwrap(), "\"all\"");
    }

    #[test]
    fn sort_mode_round_trips_through_str() {
        for mode in [SortMode::Relevance, SortMode::Hot, SortMode::New] {
            assert_eq!(mode.as_str().parse::<SortMode>().unwrap(), mode);
        }
        assert!("top".parse::<SortMode>().is_err());
    }
}
