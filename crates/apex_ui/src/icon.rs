//! Icon glyphs packed in the UI atlas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stroke icon from the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Glyph {
    /// GitHub mark.
    Github,
    /// LinkedIn mark.
    Linkedin,
    /// Twitter bird.
    Twitter,
    /// Box with outgoing arrow.
    ExternalLink,
    /// Angle brackets.
    Code2,
    /// Chip.
    Cpu,
    /// Globe.
    Globe,
    /// Lightning bolt.
    Zap,
    /// Right chevron.
    ChevronRight,
    /// Hamburger menu.
    Menu,
    /// Close cross.
    X,
    /// Diagonal up-right arrow.
    ArrowUpRight,
}

impl Glyph {
    /// Every glyph, in atlas order.
    pub const ALL: [Self; 12] = [
        Self::Github,
        Self::Linkedin,
        Self::Twitter,
        Self::ExternalLink,
        Self::Code2,
        Self::Cpu,
        Self::Globe,
        Self::Zap,
        Self::ChevronRight,
        Self::Menu,
        Self::X,
        Self::ArrowUpRight,
    ];

    /// Atlas slot of this glyph.
    #[must_use]
    pub const fn atlas_id(self) -> u32 {
        self as u32
    }

    /// Kebab-case name, as used in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::ExternalLink => "external-link",
            Self::Code2 => "code2",
            Self::Cpu => "cpu",
            Self::Globe => "globe",
            Self::Zap => "zap",
            Self::ChevronRight => "chevron-right",
            Self::Menu => "menu",
            Self::X => "x",
            Self::ArrowUpRight => "arrow-up-right",
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a glyph name is not in the atlas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown glyph: {0}")]
pub struct UnknownGlyph(pub String);

impl FromStr for Glyph {
    type Err = UnknownGlyph;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|glyph| glyph.name() == s)
            .ok_or_else(|| UnknownGlyph(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for glyph in Glyph::ALL {
            assert_eq!(glyph.name().parse::<Glyph>(), Ok(glyph));
        }
        assert!("sparkles".parse::<Glyph>().is_err());
    }

    #[test]
    fn test_atlas_ids_are_unique() {
        let mut ids: Vec<u32> = Glyph::ALL.iter().map(|g| g.atlas_id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), Glyph::ALL.len());
    }
}
