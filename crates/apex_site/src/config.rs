//! Page content and motion tuning.
//!
//! Everything the page shows is a literal in `config/site.toml`, embedded
//! at compile time. A different file can be loaded with
//! [`SiteConfig::from_file`]; whatever the source, [`SiteConfig::validate`]
//! runs before the page mounts.

use std::path::Path;

use apex_ui::{Glyph, SmoothScrollOptions};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{SiteError, SiteResult};

/// The embedded default content.
pub const EMBEDDED_CONFIG: &str = include_str!("../config/site.toml");

/// In-page anchors the page knows how to scroll to.
pub const SECTION_ANCHORS: [&str; 4] = ["#", "#projects", "#about", "#contact"];

/// Root of the site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Wordmark.
    pub brand: Brand,
    /// Every literal shown on the page.
    pub content: SiteContent,
    /// Animation tuning.
    #[serde(default)]
    pub motion: MotionSettings,
}

/// Wordmark pieces: `APEX` + `.` + `DEV`, with `A` in the logo tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    /// Name before the dot.
    pub name: String,
    /// Suffix after the dot.
    pub tld: String,
    /// Letter in the logo tile.
    pub mark: String,
}

impl Brand {
    /// `APEX.DEV`.
    #[must_use]
    pub fn wordmark(&self) -> String {
        format!("{}.{}", self.name, self.tld)
    }
}

/// Page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    /// Skill labels for the marquee.
    pub skills: Vec<String>,
    /// Navigation bar.
    pub nav: NavContent,
    /// Hero section.
    pub hero: HeroContent,
    /// Project gallery.
    pub projects: ProjectsContent,
    /// Stat badges.
    pub stats: Vec<StatRecord>,
    /// Contact section.
    pub contact: ContactContent,
    /// Footer.
    pub footer: FooterContent,
}

/// A labelled link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Visible label.
    pub name: String,
    /// `#anchor` or absolute URL.
    pub href: String,
}

/// Navigation bar content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavContent {
    /// Links, in order.
    pub links: Vec<NavLink>,
    /// Call-to-action button label.
    pub cta: String,
}

/// Hero section content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroContent {
    /// Small label above the headline.
    pub label: String,
    /// Headline lines, one per row.
    pub headline: Vec<String>,
    /// Paragraph under the headline.
    pub tagline: String,
    /// Primary button label.
    pub primary_cta: String,
    /// Secondary button label.
    pub secondary_cta: String,
}

/// One project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Card title.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Cover image URL.
    pub image: String,
}

/// Project gallery content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsContent {
    /// First heading line.
    pub title: String,
    /// Outlined second heading line.
    pub accent: String,
    /// Paragraph under the heading.
    pub blurb: String,
    /// Cards, in grid order.
    pub items: Vec<ProjectRecord>,
}

/// One stat badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    /// Caption.
    pub label: String,
    /// Figure, kept as text (`12K`, `99.9`).
    pub value: String,
    /// Icon above the figure.
    pub icon: Glyph,
}

/// A social icon link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Accessible label.
    pub label: String,
    /// Icon.
    pub icon: Glyph,
    /// Target.
    pub href: String,
}

/// Contact section content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactContent {
    /// First heading line.
    pub heading: String,
    /// Highlighted second heading line.
    pub accent: String,
    /// Paragraph under the heading.
    pub blurb: String,
    /// Mail button label.
    pub cta: String,
    /// Address behind the `mailto:` link.
    pub email: String,
    /// Social icon links.
    pub socials: Vec<SocialLink>,
}

impl ContactContent {
    /// `mailto:` target for the mail button.
    #[must_use]
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

/// Footer content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterContent {
    /// Small text links.
    pub links: Vec<NavLink>,
    /// Copyright line.
    pub copyright: String,
    /// Status caption next to the pulsing dot.
    pub status: String,
}

/// Animation tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Scroll offset (px) at which the navbar turns opaque.
    pub navbar_threshold: f32,
    /// Seconds for the marquee to travel half its track.
    pub marquee_duration: f32,
    /// How many times the skill list is repeated on the track.
    pub marquee_copies: usize,
    /// Inertial scrolling.
    pub smooth_scroll: SmoothScrollOptions,
    /// Cursor ring diameter (px).
    pub cursor_size: f32,
    /// Cursor scale over interactive elements.
    pub cursor_hover_scale: f32,
    /// Viewport inset (px) before a project card counts as in view.
    pub reveal_margin: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            navbar_threshold: 50.0,
            marquee_duration: 25.0,
            marquee_copies: 4,
            smooth_scroll: SmoothScrollOptions::default(),
            cursor_size: 32.0,
            cursor_hover_scale: 2.5,
            reveal_margin: 100.0,
        }
    }
}

impl SiteConfig {
    /// The content embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded file fails to parse or validate.
    pub fn embedded() -> SiteResult<Self> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Parse`] for malformed TOML and the errors of
    /// [`SiteConfig::validate`] for malformed content.
    pub fn from_toml_str(text: &str) -> SiteResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Io`] if the file cannot be read, otherwise the
    /// errors of [`SiteConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> SiteResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading site config");
        Self::from_toml_str(&text)
    }

    /// Checks literal well-formedness.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> SiteResult<()> {
        non_empty("brand.name", &self.brand.name)?;
        non_empty("brand.tld", &self.brand.tld)?;
        non_empty("brand.mark", &self.brand.mark)?;

        let content = &self.content;
        if content.nav.links.is_empty() {
            return Err(SiteError::invalid("content.nav.links", "no links"));
        }
        for (i, link) in content.nav.links.iter().enumerate() {
            validate_link(&format!("content.nav.links[{i}]"), link)?;
        }
        non_empty("content.nav.cta", &content.nav.cta)?;

        let hero = &content.hero;
        non_empty("content.hero.label", &hero.label)?;
        if hero.headline.is_empty() {
            return Err(SiteError::invalid("content.hero.headline", "no lines"));
        }
        for (i, line) in hero.headline.iter().enumerate() {
            non_empty(&format!("content.hero.headline[{i}]"), line)?;
        }
        non_empty("content.hero.tagline", &hero.tagline)?;
        non_empty("content.hero.primary_cta", &hero.primary_cta)?;
        non_empty("content.hero.secondary_cta", &hero.secondary_cta)?;

        if content.skills.is_empty() {
            return Err(SiteError::invalid("content.skills", "no skills"));
        }
        for (i, skill) in content.skills.iter().enumerate() {
            non_empty(&format!("content.skills[{i}]"), skill)?;
        }

        non_empty("content.projects.title", &content.projects.title)?;
        for (i, project) in content.projects.items.iter().enumerate() {
            let field = format!("content.projects.items[{i}]");
            non_empty(&format!("{field}.title"), &project.title)?;
            non_empty(&format!("{field}.category"), &project.category)?;
            validate_image(&format!("{field}.image"), &project.image)?;
        }

        for (i, stat) in content.stats.iter().enumerate() {
            non_empty(&format!("content.stats[{i}].label"), &stat.label)?;
            non_empty(&format!("content.stats[{i}].value"), &stat.value)?;
        }

        let contact = &content.contact;
        non_empty("content.contact.heading", &contact.heading)?;
        non_empty("content.contact.cta", &contact.cta)?;
        validate_email("content.contact.email", &contact.email)?;
        for (i, social) in contact.socials.iter().enumerate() {
            let field = format!("content.contact.socials[{i}]");
            non_empty(&format!("{field}.label"), &social.label)?;
            validate_href(&format!("{field}.href"), &social.href)?;
        }

        for (i, link) in content.footer.links.iter().enumerate() {
            validate_link(&format!("content.footer.links[{i}]"), link)?;
        }
        non_empty("content.footer.copyright", &content.footer.copyright)?;

        self.motion.validate()
    }
}

impl MotionSettings {
    fn validate(&self) -> SiteResult<()> {
        at_least("motion.navbar_threshold", self.navbar_threshold, 0.0)?;
        positive("motion.marquee_duration", self.marquee_duration)?;
        if self.marquee_copies < 2 {
            return Err(SiteError::invalid(
                "motion.marquee_copies",
                "need at least 2 copies to loop",
            ));
        }
        positive("motion.cursor_size", self.cursor_size)?;
        at_least("motion.cursor_hover_scale", self.cursor_hover_scale, 1.0)?;
        at_least("motion.reveal_margin", self.reveal_margin, 0.0)
    }
}

fn at_least(field: &str, value: f32, min: f32) -> SiteResult<()> {
    if value.is_nan() || value < min {
        return Err(SiteError::invalid(field, format!("must be >= {min}")));
    }
    Ok(())
}

fn positive(field: &str, value: f32) -> SiteResult<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(SiteError::invalid(field, "must be > 0"));
    }
    Ok(())
}

fn non_empty(field: &str, value: &str) -> SiteResult<()> {
    if value.trim().is_empty() {
        return Err(SiteError::invalid(field, "empty"));
    }
    Ok(())
}

fn validate_link(field: &str, link: &NavLink) -> SiteResult<()> {
    non_empty(&format!("{field}.name"), &link.name)?;
    validate_href(&format!("{field}.href"), &link.href)
}

/// `#anchor` of a known section, or an absolute URL.
fn validate_href(field: &str, href: &str) -> SiteResult<()> {
    if href.starts_with('#') {
        if SECTION_ANCHORS.contains(&href) {
            return Ok(());
        }
        return Err(SiteError::UnknownAnchor(href.to_owned()));
    }
    Url::parse(href)
        .map(|_| ())
        .map_err(|e| SiteError::invalid(field, format!("{href}: {e}")))
}

fn validate_image(field: &str, image: &str) -> SiteResult<()> {
    let url = Url::parse(image).map_err(|e| SiteError::invalid(field, format!("{image}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SiteError::invalid(
            field,
            format!("unsupported image scheme {other}"),
        )),
    }
}

fn validate_email(field: &str, email: &str) -> SiteResult<()> {
    let Some((user, host)) = email.split_once('@') else {
        return Err(SiteError::invalid(field, "missing @"));
    };
    if user.is_empty() || host.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(SiteError::invalid(field, format!("malformed address {email}")));
    }
    Url::parse(&format!("mailto:{email}"))
        .map(|_| ())
        .map_err(|e| SiteError::invalid(field, e.to_string()))
}
