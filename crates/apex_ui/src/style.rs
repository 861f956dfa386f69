//! Colors, fonts and the APEX theme.
//!
//! Near-black surfaces, one electric yellow accent, white display type.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// `apex-black`, #0A0A0A.
    pub const APEX_BLACK: Self = Self::hex(0x0A0A_0AFF);
    /// `apex-gray`, #151515.
    pub const APEX_GRAY: Self = Self::hex(0x1515_15FF);
    /// `apex-yellow`, #F0FF00.
    pub const APEX_YELLOW: Self = Self::hex(0xF0FF_00FF);
    /// Tailwind `gray-400`.
    pub const GRAY_400: Self = Self::hex(0x9CA3_AFFF);
    /// Tailwind `gray-500`.
    pub const GRAY_500: Self = Self::hex(0x6B72_80FF);
    /// Tailwind `green-500`.
    pub const GREEN_500: Self = Self::hex(0x22C5_5EFF);
    /// Tailwind `blue-500`.
    pub const BLUE_500: Self = Self::hex(0x3B82_F6FF);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Returns true when the color is fully transparent.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= f32::EPSILON
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Type family used by a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFace {
    /// Body copy.
    #[default]
    Body,
    /// Heavy display face for headings and labels.
    Display,
    /// Monospace for small caps labels.
    Mono,
}

impl FontFace {
    /// Average glyph advance as a fraction of the font size.
    ///
    /// Used for headless text measurement.
    #[must_use]
    pub fn advance(self) -> f32 {
        match self {
            Self::Body => 0.5,
            Self::Display => 0.62,
            Self::Mono => 0.6,
        }
    }

    /// Estimated width of `text` at `font_size`, plus `tracking` per glyph.
    #[must_use]
    pub fn measure(self, text: &str, font_size: f32, tracking: f32) -> f32 {
        let glyphs = text.chars().count() as f32;
        glyphs * (font_size * self.advance() + tracking)
    }
}

/// Complete theme for the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Page background.
    pub background: Color,
    /// Raised surfaces (cards, stats band).
    pub surface: Color,
    /// Accent color.
    pub primary: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary copy.
    pub text_muted: Color,
    /// Small print.
    pub text_faint: Color,
    /// Hairline borders (`white/10`).
    pub border: Color,
    /// Status indicator.
    pub status: Color,
}

impl Theme {
    /// The APEX dark theme.
    pub const APEX: Self = Self {
        background: Color::APEX_BLACK,
        surface: Color::APEX_GRAY,
        primary: Color::APEX_YELLOW,
        text: Color::WHITE,
        text_muted: Color::GRAY_400,
        text_faint: Color::GRAY_500,
        border: Color::rgba(1.0, 1.0, 1.0, 0.1),
        status: Color::GREEN_500,
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::APEX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lerp() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);

        assert!((mid.r - 0.5).abs() < 0.01);
        assert!((mid.g - 0.5).abs() < 0.01);
        assert!((mid.b - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_color_hex() {
        let yellow = Color::APEX_YELLOW;
        assert!((yellow.r - 240.0 / 255.0).abs() < 0.001);
        assert!((yellow.g - 1.0).abs() < 0.001);
        assert!(yellow.b.abs() < 0.001);
        assert!((yellow.a - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_measure_scales_with_text() {
        let short = FontFace::Display.measure("GO", 48.0, 0.0);
        let long = FontFace::Display.measure("GRAPHQL", 48.0, 0.0);
        assert!(long > short * 3.0);
    }
}
