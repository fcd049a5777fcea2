//! Segment: a text chunk paired with its resolved style.
//!
//! Segments are what this crate hands to a renderer; line wrapping, cell
//! width accounting and device output happen on the other side of that
//! boundary.

use crate::style::Style;

/// A styled text chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    text: String,
    style: Style,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// A segment with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::null())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Render as `escapes + text + reset`, or the bare text for a style
    /// that produces no escapes.
    pub fn render(&self) -> String {
        self.style.render(&self.text)
    }
}
