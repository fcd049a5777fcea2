//! Text attributes and the composable [`Style`] value object.
//!
//! A style records which attributes were explicitly specified (the set
//! mask) separately from whether each one is on or off (the value mask), so
//! that composition can distinguish "turned off" from "never mentioned".

use std::fmt;

use bitflags::bitflags;
use once_cell::sync::OnceCell;

use crate::color::{Color, ColorMode, Layer};
use crate::error::StyleError;

/// Full reset: clears colors and every text attribute.
pub const RESET: &str = "\x1b[0m";

bitflags! {
    /// The six text attributes, one bit each.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Attributes: u8 {
        const BOLD = 1;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const STRIKE = 1 << 5;
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Attributes::empty()
    }
}

/// Attribute bits in serialization order with their name and SGR code.
const ATTRIBUTE_TABLE: [(Attributes, &str, &str); 6] = [
    (Attributes::BOLD, "bold", "1"),
    (Attributes::DIM, "dim", "2"),
    (Attributes::ITALIC, "italic", "3"),
    (Attributes::UNDERLINE, "underline", "4"),
    (Attributes::BLINK, "blink", "5"),
    (Attributes::STRIKE, "strike", "9"),
];

/// Resolve an attribute keyword or single-letter alias.
pub(crate) fn attribute_for(word: &str) -> Option<Attributes> {
    match word {
        "bold" | "b" => Some(Attributes::BOLD),
        "dim" | "d" => Some(Attributes::DIM),
        "italic" | "i" => Some(Attributes::ITALIC),
        "underline" | "u" => Some(Attributes::UNDERLINE),
        "blink" => Some(Attributes::BLINK),
        "strike" | "s" => Some(Attributes::STRIKE),
        _ => None,
    }
}

/// A set of explicitly-specified text attributes plus optional colors.
///
/// Styles are value objects: composition with [`Style::apply`] always
/// produces a new instance. The textual form and the SGR fragment are
/// computed at most once behind one-time cells, so shared instances need no
/// further synchronization.
///
/// # Examples
///
/// ```
/// use pigment::{Attributes, ColorMode, Style};
///
/// let style = Style::parse("bold red", ColorMode::EightBit).unwrap();
/// assert!(style.is_on(Attributes::BOLD));
/// assert_eq!(style.to_string(), "bold #FF0000");
/// assert_eq!(style.render("hi"), "\x1b[1m\x1b[38;5;196mhi\x1b[0m");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Style {
    set: Attributes,
    values: Attributes,
    fg: Option<Color>,
    bg: Option<Color>,
    definition: OnceCell<String>,
    ansi: OnceCell<String>,
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set
            && self.values == other.values
            && self.fg == other.fg
            && self.bg == other.bg
    }
}

impl Eq for Style {}

impl Style {
    /// A style with nothing specified.
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity element for [`Style::apply`].
    pub fn null() -> Self {
        Self::default()
    }

    fn from_parts(set: Attributes, values: Attributes, fg: Option<Color>, bg: Option<Color>) -> Self {
        Self {
            set,
            // value bits are meaningful only under the set mask
            values: values & set,
            fg,
            bg,
            definition: OnceCell::new(),
            ansi: OnceCell::new(),
        }
    }

    /// True when nothing is specified and no colors are present.
    pub fn is_null(&self) -> bool {
        self.set.is_empty() && self.fg.is_none() && self.bg.is_none()
    }

    /// Explicitly set one attribute on or off.
    pub fn with_attribute(self, attribute: Attributes, on: bool) -> Self {
        let set = self.set | attribute;
        let values = if on {
            self.values | attribute
        } else {
            self.values & !attribute
        };
        Self::from_parts(set, values, self.fg, self.bg)
    }

    pub fn bold(self, on: bool) -> Self {
        self.with_attribute(Attributes::BOLD, on)
    }

    pub fn dim(self, on: bool) -> Self {
        self.with_attribute(Attributes::DIM, on)
    }

    pub fn italic(self, on: bool) -> Self {
        self.with_attribute(Attributes::ITALIC, on)
    }

    pub fn underline(self, on: bool) -> Self {
        self.with_attribute(Attributes::UNDERLINE, on)
    }

    pub fn blink(self, on: bool) -> Self {
        self.with_attribute(Attributes::BLINK, on)
    }

    pub fn strike(self, on: bool) -> Self {
        self.with_attribute(Attributes::STRIKE, on)
    }

    pub fn with_fg(self, color: Color) -> Self {
        Self::from_parts(self.set, self.values, Some(color), self.bg)
    }

    pub fn with_bg(self, color: Color) -> Self {
        Self::from_parts(self.set, self.values, self.fg, Some(color))
    }

    /// True if the attribute was explicitly specified (on or off).
    pub fn is_set(&self, attribute: Attributes) -> bool {
        self.set.contains(attribute)
    }

    /// True if the attribute was explicitly specified as on.
    pub fn is_on(&self, attribute: Attributes) -> bool {
        self.set.contains(attribute) && self.values.contains(attribute)
    }

    pub fn fg(&self) -> Option<&Color> {
        self.fg.as_ref()
    }

    pub fn bg(&self) -> Option<&Color> {
        self.bg.as_ref()
    }

    /// Layer `overlay` on top of `self`.
    ///
    /// Right-biased: for attributes the overlay explicitly touches the
    /// overlay wins, for the rest the base value survives; overlay colors
    /// replace base colors when present. A null overlay returns the base
    /// unchanged.
    pub fn apply(&self, overlay: &Style) -> Style {
        if overlay.is_null() {
            return self.clone();
        }
        Self::from_parts(
            self.set | overlay.set,
            (self.values & !overlay.set) | (overlay.values & overlay.set),
            overlay.fg.clone().or_else(|| self.fg.clone()),
            overlay.bg.clone().or_else(|| self.bg.clone()),
        )
    }

    /// Parse a style expression: `[color] [on color] [attribute]*` in any
    /// order, tokens separated by whitespace.
    ///
    /// `on` must be immediately followed by one color token. A token that
    /// is neither a recognized attribute keyword nor a valid color is a
    /// [`StyleError`].
    pub fn parse(definition: &str, mode: ColorMode) -> Result<Self, StyleError> {
        let mut style = Style::new();
        let mut words = definition.split_whitespace();

        while let Some(word) = words.next() {
            let lower = word.to_lowercase();
            if lower == "on" {
                let Some(color_word) = words.next() else {
                    return Err(StyleError::MissingBackground);
                };
                if !Color::is_color(color_word) {
                    return Err(StyleError::InvalidBackground(color_word.to_string()));
                }
                style = style.with_bg(Color::new(color_word, Layer::Background, mode)?);
            } else if let Some(attribute) = attribute_for(&lower) {
                style = style.with_attribute(attribute, true);
            } else if Color::is_color(&lower) {
                style = style.with_fg(Color::new(&lower, Layer::Foreground, mode)?);
            } else {
                return Err(StyleError::UnknownToken(word.to_string()));
            }
        }

        Ok(style)
    }

    /// The SGR fragment: one `ESC[...m` envelope with the codes of every
    /// attribute that is explicitly on, followed by the foreground and
    /// background escapes. Cached after the first computation.
    pub fn sgr(&self) -> &str {
        self.ansi
            .get_or_init(|| {
                let on = self.set & self.values;
                let codes: Vec<&str> = ATTRIBUTE_TABLE
                    .iter()
                    .filter(|(attribute, _, _)| on.contains(*attribute))
                    .map(|(_, _, code)| *code)
                    .collect();

                let mut out = String::new();
                if !codes.is_empty() {
                    out.push_str("\x1b[");
                    out.push_str(&codes.join(";"));
                    out.push('m');
                }
                if let Some(fg) = &self.fg {
                    out.push_str(fg.escape());
                }
                if let Some(bg) = &self.bg {
                    out.push_str(bg.escape());
                }
                out
            })
            .as_str()
    }

    /// Wrap `text` in this style's escapes and a trailing full reset.
    ///
    /// Text passes through untouched when the style produces no escapes.
    pub fn render(&self, text: &str) -> String {
        let sgr = self.sgr();
        if sgr.is_empty() {
            text.to_string()
        } else {
            format!("{sgr}{text}{RESET}")
        }
    }

    /// The textual form: attribute words (`bold`, `not bold`, ...), the
    /// foreground hex, `on <hex>` for the background; `none` when nothing
    /// is specified. Cached after the first computation.
    pub fn definition(&self) -> &str {
        self.definition
            .get_or_init(|| {
                let mut words: Vec<String> = Vec::new();
                for (attribute, name, _) in ATTRIBUTE_TABLE {
                    if self.set.contains(attribute) {
                        if self.values.contains(attribute) {
                            words.push(name.to_string());
                        } else {
                            words.push(format!("not {name}"));
                        }
                    }
                }
                if let Some(fg) = &self.fg {
                    if !fg.hex().is_empty() {
                        words.push(fg.hex().to_string());
                    }
                }
                if let Some(bg) = &self.bg {
                    if !bg.hex().is_empty() {
                        words.push(format!("on {}", bg.hex()));
                    }
                }
                if words.is_empty() {
                    "none".to_string()
                } else {
                    words.join(" ")
                }
            })
            .as_str()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition())
    }
}

/// Remove SGR escape sequences from text, keeping everything else.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("\x1b[") {
        let (head, tail) = rest.split_at(start);
        out.push_str(head);
        let body = &tail[2..];
        match body.find(|c: char| !c.is_ascii_digit() && c != ';') {
            Some(idx) if body[idx..].starts_with('m') => {
                rest = &body[idx + 1..];
            }
            _ => {
                // not an SGR sequence, keep the introducer
                out.push_str("\x1b[");
                rest = body;
            }
        }
    }
    out.push_str(rest);
    out
}
