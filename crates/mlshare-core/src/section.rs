#![forbid(unsafe_code)]

//! Section identity and descriptors.
//!
//! A [`SectionId`] is both the anchor a section container exposes and the
//! value the navigation state holds. Ids are plain strings: nothing here
//! checks them against a registry, so state may legitimately hold an id that
//! no section carries.

use std::borrow::Borrow;
use std::fmt;

/// Identifier of a page section (`"foundations"`, `"agents"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(String);

impl SectionId {
    /// Create an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Icon shown next to a section title or card heading.
///
/// Purely presentational: hosts pick a glyph or an icon name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    #[default]
    Brain,
    Network,
    Code,
    Bot,
    Rocket,
    GitBranch,
    Layers,
    Zap,
    Database,
    Lightbulb,
    Target,
    BookOpen,
    TrendingUp,
    ChevronRight,
}

impl Icon {
    /// Kebab-case icon name, as used by icon fonts and in markup.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Brain => "brain",
            Self::Network => "network",
            Self::Code => "code",
            Self::Bot => "bot",
            Self::Rocket => "rocket",
            Self::GitBranch => "git-branch",
            Self::Layers => "layers",
            Self::Zap => "zap",
            Self::Database => "database",
            Self::Lightbulb => "lightbulb",
            Self::Target => "target",
            Self::BookOpen => "book-open",
            Self::TrendingUp => "trending-up",
            Self::ChevronRight => "chevron-right",
        }
    }

    /// Single-cell glyph for text surfaces.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Brain => '◉',
            Self::Network => '⌬',
            Self::Code => '⌨',
            Self::Bot => '⚙',
            Self::Rocket => '➚',
            Self::GitBranch => '⑂',
            Self::Layers => '≡',
            Self::Zap => '⚡',
            Self::Database => '⛁',
            Self::Lightbulb => '✦',
            Self::Target => '◎',
            Self::BookOpen => '❐',
            Self::TrendingUp => '↗',
            Self::ChevronRight => '›',
        }
    }
}

/// Two-stop gradient token, e.g. `from-blue-500 to-purple-600`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gradient {
    /// Start color token (`blue-500`).
    pub from: &'static str,
    /// End color token (`purple-600`).
    pub to: &'static str,
}

impl Gradient {
    #[must_use]
    pub const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }

    /// Utility-class form: `from-<from> to-<to>`.
    #[must_use]
    pub fn class(&self) -> String {
        format!("from-{} to-{}", self.from, self.to)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new("blue-500", "purple-600")
    }
}

/// Presentation-only metadata. Opaque to navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayMeta {
    pub icon: Icon,
    pub gradient: Gradient,
}

impl DisplayMeta {
    #[must_use]
    pub const fn new(icon: Icon, gradient: Gradient) -> Self {
        Self { icon, gradient }
    }
}

/// Immutable description of one navigable section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDescriptor {
    /// Unique id; doubles as the section's anchor.
    pub id: SectionId,
    /// Display name.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Icon and gradient.
    pub display_meta: DisplayMeta,
}

impl SectionDescriptor {
    /// Create a descriptor with default display metadata.
    #[must_use]
    pub fn new(
        id: impl Into<SectionId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            display_meta: DisplayMeta::default(),
        }
    }

    /// Set the display metadata.
    #[must_use]
    pub fn with_meta(mut self, display_meta: DisplayMeta) -> Self {
        self.display_meta = display_meta;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_id_compares_with_str() {
        let id = SectionId::from("agents");
        assert_eq!(id, "agents");
        assert_eq!(id.as_str(), "agents");
        assert_eq!(id.to_string(), "agents");
    }

    #[test]
    fn gradient_class() {
        let g = Gradient::new("red-500", "orange-600");
        assert_eq!(g.class(), "from-red-500 to-orange-600");
    }

    #[test]
    fn descriptor_builder() {
        let d = SectionDescriptor::new("future", "Future Possibilities", "Strategy")
            .with_meta(DisplayMeta::new(Icon::Rocket, Gradient::new("orange-500", "yellow-600")));
        assert_eq!(d.id, "future");
        assert_eq!(d.display_meta.icon, Icon::Rocket);
        assert_eq!(d.display_meta.icon.name(), "rocket");
    }
}
