//! Ephemeral view state: severity filter, sort order, expansion, form flag.

use super::incident::{ParseEnumError, Severity, normalize};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Severity filter applied to the incident list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeverityFilter {
    /// Identity filter.
    #[default]
    All,
    /// Keep only incidents of exactly this severity.
    Only(Severity),
}

impl SeverityFilter {
    /// Control values in display order: All, Low, Medium, High.
    pub const OPTIONS: [Self; 4] = [
        Self::All,
        Self::Only(Severity::Low),
        Self::Only(Severity::Medium),
        Self::Only(Severity::High),
    ];

    /// Returns true if `severity` passes this filter.
    #[must_use]
    pub fn matches(self, severity: Severity) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == severity,
        }
    }

    fn position(self) -> usize {
        Self::OPTIONS
            .iter()
            .position(|option| *option == self)
            .unwrap_or(0)
    }

    /// Next control value, wrapping from High back to All.
    #[must_use]
    pub fn next(self) -> Self {
        Self::OPTIONS[(self.position() + 1) % Self::OPTIONS.len()]
    }

    /// Previous control value, wrapping from All to High.
    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::OPTIONS.len();
        Self::OPTIONS[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(severity) => write!(f, "{severity}"),
        }
    }
}

impl FromStr for SeverityFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize(s) == "all" {
            return Ok(Self::All);
        }
        s.parse::<Severity>()
            .map(Self::Only)
            .map_err(|_| ParseEnumError {
                expected: "severity filter",
                got: s.to_string(),
            })
    }
}

impl TryFrom<String> for SeverityFilter {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeverityFilter> for String {
    fn from(value: SeverityFilter) -> Self {
        value.to_string()
    }
}

/// Ordering of the incident list by `reported_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Descending by report time.
    #[default]
    #[serde(alias = "newest-first")]
    Newest,
    /// Ascending by report time.
    #[serde(alias = "oldest-first")]
    Oldest,
}

impl SortOrder {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    /// Label used by the sort control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Newest,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "newest" | "newest-first" => Ok(Self::Newest),
            "oldest" | "oldest-first" => Ok(Self::Oldest),
            _ => Err(ParseEnumError {
                expected: "sort order",
                got: s.to_string(),
            }),
        }
    }
}

/// Transient UI state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub filter: SeverityFilter,
    pub sort: SortOrder,
    /// At most one incident shows its details at a time.
    pub expanded: Option<u64>,
    pub form_open: bool,
}
