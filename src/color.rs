//! Color resolution and SGR escape generation.
//!
//! A [`Color`] is resolved once, from a name, a hex literal or an RGB
//! triple, and carries its escape sequence from construction on. Whether
//! that escape addresses the 256-color palette or uses 24-bit parameters is
//! decided by the [`ColorMode`] passed in, so resolved colors are plain
//! immutable values that can be shared freely.

use crate::error::ColorError;
use crate::palette;

/// An RGB triple with components in 0–255.
pub type Rgb = (u8, u8, u8);

/// Escape flavor for color sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// `ESC[<p>;5;<index>m` against the 256-color palette.
    #[default]
    EightBit,
    /// `ESC[<p>;2;R;G;Bm` with 24-bit components.
    TrueColor,
}

/// Whether a color applies to the text or to the cell behind it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Foreground,
    Background,
}

impl Layer {
    fn sgr_parameter(self) -> u8 {
        match self {
            Layer::Foreground => 38,
            Layer::Background => 48,
        }
    }
}

/// A resolved terminal color.
///
/// Construction recognizes, in order: the empty value ("no color"), a name
/// from the static palette, a `#RRGGBB` literal, a `#RR` grayscale literal,
/// and (via [`Color::from_triple`]) a 3-length integer sequence. Anything
/// else is a [`ColorError`].
///
/// # Examples
///
/// ```
/// use pigment::{Color, ColorMode, Layer};
///
/// let red = Color::new("red", Layer::Foreground, ColorMode::EightBit).unwrap();
/// assert_eq!(red.escape(), "\x1b[38;5;196m");
///
/// let true_red = Color::new("#ff0000", Layer::Foreground, ColorMode::TrueColor).unwrap();
/// assert_eq!(true_red.escape(), "\x1b[38;2;255;0;0m");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Color {
    rgb: Option<Rgb>,
    hex: String,
    layer: Layer,
    default: bool,
    escape: String,
}

impl Color {
    /// Resolve a color value for the given layer.
    ///
    /// The empty string resolves to the "no color" sentinel, as does any
    /// palette name mapped to an empty hex (`plain`).
    pub fn new(value: &str, layer: Layer, mode: ColorMode) -> Result<Self, ColorError> {
        if value.is_empty() {
            return Ok(Self::none(layer));
        }

        let hex = if let Some(mapped) = palette::lookup(value) {
            mapped
        } else if value.starts_with('#') {
            value
        } else {
            return Err(ColorError::Invalid(value.to_string()));
        };

        if hex.is_empty() {
            return Ok(Self::none(layer));
        }

        let rgb = Self::parse_hex(hex)?;
        Ok(Self::resolved(rgb, hex.to_string(), layer, mode))
    }

    /// Resolve a foreground color.
    pub fn fg(value: &str, mode: ColorMode) -> Result<Self, ColorError> {
        Self::new(value, Layer::Foreground, mode)
    }

    /// Resolve a background color.
    pub fn bg(value: &str, mode: ColorMode) -> Result<Self, ColorError> {
        Self::new(value, Layer::Background, mode)
    }

    /// Resolve a palette name, degrading to "no color" when unknown.
    ///
    /// This is the lenient lookup used by the backtick markup grammar.
    pub fn by_name(name: &str, layer: Layer, mode: ColorMode) -> Self {
        match palette::lookup(name) {
            Some(hex) => Self::new(hex, layer, mode).unwrap_or_else(|_| Self::none(layer)),
            None => Self::none(layer),
        }
    }

    /// Resolve a 3-length integer sequence with components in 0–255.
    pub fn from_triple(channels: &[i64], layer: Layer, mode: ColorMode) -> Result<Self, ColorError> {
        if !Self::is_triple(channels) {
            return Err(ColorError::InvalidTriple(channels.to_vec()));
        }
        let rgb = (channels[0] as u8, channels[1] as u8, channels[2] as u8);
        let hex = format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2);
        Ok(Self::resolved(rgb, hex, layer, mode))
    }

    /// The "no color" sentinel: empty hex, empty escape.
    pub fn none(layer: Layer) -> Self {
        Self {
            rgb: None,
            hex: String::new(),
            layer,
            default: false,
            escape: String::new(),
        }
    }

    /// The default background: no RGB value, background-reset escape.
    pub fn default_background() -> Self {
        Self {
            rgb: None,
            hex: String::new(),
            layer: Layer::Background,
            default: true,
            escape: "\x1b[49m".to_string(),
        }
    }

    fn resolved(rgb: Rgb, hex: String, layer: Layer, mode: ColorMode) -> Self {
        let escape = Self::escape_sequence(rgb, layer, mode);
        Self {
            rgb: Some(rgb),
            hex,
            layer,
            default: false,
            escape,
        }
    }

    /// True if the string looks like a color: a palette name, `#RRGGBB`,
    /// or `#RR`.
    pub fn is_color(value: &str) -> bool {
        if let Some(digits) = value.strip_prefix('#') {
            (digits.len() == 2 || digits.len() == 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
        } else {
            palette::lookup(value).is_some()
        }
    }

    /// True if the slice is a 3-length sequence with components in 0–255.
    pub fn is_triple(channels: &[i64]) -> bool {
        channels.len() == 3 && channels.iter().all(|c| (0..=255).contains(c))
    }

    /// Parse `#RRGGBB` (direct RGB) or `#RR` (grayscale, replicated).
    fn parse_hex(hex: &str) -> Result<Rgb, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match digits.len() {
            2 => {
                let v = u8::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok((v, v, v))
            }
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| invalid())?;
                let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| invalid())?;
                let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| invalid())?;
                Ok((r, g, b))
            }
            _ => Err(invalid()),
        }
    }

    /// Map a 24-bit color to the 256-color palette.
    ///
    /// Channels that land in the same `/11` bucket map to the grayscale
    /// ramp; everything else maps to the 6-level color cube.
    ///
    /// ```
    /// use pigment::Color;
    ///
    /// assert_eq!(Color::downsample((255, 0, 0)), 196);
    /// assert_eq!(Color::downsample((128, 128, 128)), 243);
    /// ```
    pub fn downsample(rgb: Rgb) -> u8 {
        let (r, g, b) = rgb;
        let gray = (r / 11, g / 11, b / 11);
        if gray.0 == gray.1 && gray.1 == gray.2 {
            232 + gray.0
        } else {
            let level = |c: u8| (f32::from(c) / 51.0).round() as u8;
            16 + level(r) * 36 + level(g) * 6 + level(b)
        }
    }

    fn escape_sequence(rgb: Rgb, layer: Layer, mode: ColorMode) -> String {
        let param = layer.sgr_parameter();
        match mode {
            ColorMode::TrueColor => format!("\x1b[{};2;{};{};{}m", param, rgb.0, rgb.1, rgb.2),
            ColorMode::EightBit => format!("\x1b[{};5;{}m", param, Self::downsample(rgb)),
        }
    }

    /// The escape sequence, computed at construction. Empty for "no color".
    pub fn escape(&self) -> &str {
        &self.escape
    }

    /// The hex form this color resolved through; empty for "no color".
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The RGB triple, or `None` for the "no color" sentinel.
    pub fn rgb(&self) -> Option<Rgb> {
        self.rgb
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// True for the default-background color.
    pub fn is_default(&self) -> bool {
        self.default
    }

    /// True for the "no color" sentinel.
    pub fn is_none_color(&self) -> bool {
        self.rgb.is_none() && !self.default
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.escape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_named() {
        let color = Color::new("red", Layer::Foreground, ColorMode::EightBit).unwrap();
        assert_eq!(color.rgb(), Some((255, 0, 0)));
        assert_eq!(color.hex(), "#FF0000");
        assert_eq!(color.escape(), "\x1b[38;5;196m");
    }

    #[test]
    fn resolve_hex_pair_replicates() {
        let color = Color::new("#f0", Layer::Foreground, ColorMode::TrueColor).unwrap();
        assert_eq!(color.rgb(), Some((240, 240, 240)));
        assert_eq!(color.escape(), "\x1b[38;2;240;240;240m");
    }

    #[test]
    fn resolve_background_parameter() {
        let color = Color::bg("#ff0000", ColorMode::TrueColor).unwrap();
        assert_eq!(color.escape(), "\x1b[48;2;255;0;0m");
    }

    #[test]
    fn empty_value_is_none_color() {
        let color = Color::new("", Layer::Background, ColorMode::EightBit).unwrap();
        assert!(color.is_none_color());
        assert_eq!(color.escape(), "");
    }

    #[test]
    fn plain_name_is_none_color() {
        let color = Color::new("plain", Layer::Foreground, ColorMode::EightBit).unwrap();
        assert!(color.is_none_color());
    }

    #[test]
    fn default_background_resets() {
        let color = Color::default_background();
        assert!(color.is_default());
        assert_eq!(color.escape(), "\x1b[49m");
    }

    #[test]
    fn reject_unrecognized() {
        assert!(matches!(
            Color::new("no_such", Layer::Foreground, ColorMode::EightBit),
            Err(ColorError::Invalid(_))
        ));
        assert!(matches!(
            Color::new("#ff00", Layer::Foreground, ColorMode::EightBit),
            Err(ColorError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::new("#gg0000", Layer::Foreground, ColorMode::EightBit),
            Err(ColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn triple_validation() {
        assert!(Color::is_triple(&[255, 0, 0]));
        assert!(!Color::is_triple(&[-1, 0, 0]));
        assert!(!Color::is_triple(&[256, 0, 0]));
        assert!(!Color::is_triple(&[0, 0]));
        assert!(!Color::is_triple(&[0, 0, 0, 0]));
    }

    #[test]
    fn from_triple_formats_hex() {
        let color = Color::from_triple(&[205, 255, 0], Layer::Foreground, ColorMode::EightBit)
            .unwrap();
        assert_eq!(color.hex(), "#cdff00");
    }

    #[test]
    fn by_name_degrades_to_none() {
        assert!(Color::by_name("no_such", Layer::Foreground, ColorMode::EightBit).is_none_color());
    }

    #[test]
    fn downsample_gray_ramp() {
        assert_eq!(Color::downsample((0, 0, 0)), 232);
        assert_eq!(Color::downsample((255, 255, 255)), 255);
        for v in 0..=255u8 {
            let index = Color::downsample((v, v, v));
            assert!((232..=255).contains(&index));
        }
    }

    #[test]
    fn downsample_cube_corners() {
        assert_eq!(Color::downsample((255, 0, 0)), 196);
        assert_eq!(Color::downsample((0, 255, 0)), 46);
        assert_eq!(Color::downsample((0, 0, 255)), 21);
    }
}
