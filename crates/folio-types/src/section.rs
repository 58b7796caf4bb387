//! Section registry: the closed set of page regions backing the navigation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// A vertically stacked region of the single-page layout.
///
/// The string form (`"home"`, `"about"`, ...) doubles as the element id the
/// host uses to locate the region on screen and as the URL fragment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    #[default]
    Home,
    About,
    Skills,
    Projects,
    Achievements,
    Contact,
}

impl SectionId {
    /// All sections in document (top-to-bottom) order.
    pub const ALL: [SectionId; 6] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Achievements,
        SectionId::Contact,
    ];

    /// Canonical order used by the viewport scanner: bottom-most section
    /// first. The first qualifying entry wins, so once a later section's top
    /// crosses the activation line it takes precedence over every section
    /// above it.
    pub const SCAN_ORDER: [SectionId; 6] = [
        SectionId::Contact,
        SectionId::Achievements,
        SectionId::Projects,
        SectionId::Skills,
        SectionId::About,
        SectionId::Home,
    ];

    /// Element identifier / fragment name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Achievements => "achievements",
            Self::Contact => "contact",
        }
    }

    /// Membership test: map an element id to a known section.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == id)
    }

    /// Whether `id` names one of the registered sections.
    pub fn is_registered(id: &str) -> bool {
        Self::parse(id).is_some()
    }

    /// URL fragment for this section: empty for `home`, `#<id>` otherwise.
    pub fn hash(self) -> String {
        match self {
            Self::Home => String::new(),
            other => format!("#{}", other.as_str()),
        }
    }

    /// Inverse of [`SectionId::hash`], used when the page is opened with a
    /// deep link. A blank fragment (`""`, `"#"`, `" "`) means `home`;
    /// unknown fragments yield `None`.
    pub fn from_hash(fragment: &str) -> Option<Self> {
        let trimmed = fragment.trim();
        let name = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
        if name.is_empty() {
            return Some(Self::Home);
        }
        Self::parse(name)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| FolioError::Config(format!("unknown section `{s}`")))
    }
}
