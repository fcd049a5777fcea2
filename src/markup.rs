//! Parsed markup: plain text plus styled spans.
//!
//! [`Markup`] is the result of parsing the bracketed-tag grammar. Spans
//! carry raw style strings; resolving them to concrete styles happens when
//! segments are requested, and fails fast on the first bad style string.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::color::ColorMode;
use crate::error::{MarkupError, StyleError};
use crate::parser;
use crate::segment::Segment;
use crate::span::Span;
use crate::style::Style;

/// The result of parsing bracketed-tag markup.
///
/// # Examples
///
/// ```
/// use pigment::Markup;
///
/// let markup = Markup::parse("[bold]Hello[/bold] World").unwrap();
/// assert_eq!(markup.text(), "Hello World");
/// assert_eq!(markup.spans().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markup {
    text: String,
    spans: Vec<Span>,
}

impl Markup {
    pub(crate) fn new(text: String, spans: Vec<Span>) -> Self {
        Self { text, spans }
    }

    /// Parse bracketed-tag markup.
    ///
    /// Nesting must be strictly well-formed: a closing tag must name the
    /// nearest open tag. Tags still open at end of input are closed
    /// implicitly at the final position.
    pub fn parse(source: &str) -> Result<Self, MarkupError> {
        parser::parse(source)
    }

    /// The plain text with all tags stripped.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The styled spans, in close order (inner before outer).
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// True if no spans were produced.
    pub fn is_plain(&self) -> bool {
        self.spans.is_empty()
    }

    /// The resolved style at a byte offset: every covering span applied
    /// outermost-first, so the innermost tag wins.
    pub fn style_at(&self, offset: usize, mode: ColorMode) -> Result<Style, MarkupError> {
        let resolved = self.resolve_spans(mode)?;
        Ok(self.fold_styles(offset, &resolved, &Style::null()))
    }

    /// Split into (text, resolved style) segments.
    pub fn segments(&self, mode: ColorMode) -> Result<Vec<Segment>, MarkupError> {
        self.segments_with(&Style::null(), mode)
    }

    /// Split into segments, layering every span style over `base`.
    pub fn segments_with(&self, base: &Style, mode: ColorMode) -> Result<Vec<Segment>, MarkupError> {
        let resolved = self.resolve_spans(mode)?;

        let mut boundaries = BTreeSet::new();
        boundaries.insert(0);
        boundaries.insert(self.text.len());
        for span in &self.spans {
            boundaries.insert(span.start.min(self.text.len()));
            boundaries.insert(span.end.min(self.text.len()));
        }

        let mut segments = Vec::new();
        let mut cuts = boundaries.into_iter();
        let Some(mut start) = cuts.next() else {
            return Ok(segments);
        };
        for end in cuts {
            if end > start {
                let style = self.fold_styles(start, &resolved, base);
                segments.push(Segment::new(&self.text[start..end], style));
            }
            start = end;
        }
        Ok(segments)
    }

    /// Render to a string of literal text and escape sequences.
    pub fn render(&self, mode: ColorMode) -> Result<String, MarkupError> {
        Ok(self
            .segments(mode)?
            .iter()
            .map(Segment::render)
            .collect())
    }

    fn resolve_spans(&self, mode: ColorMode) -> Result<Vec<Style>, MarkupError> {
        let resolved = self
            .spans
            .iter()
            .map(|span| Style::parse(&span.style, mode))
            .collect::<Result<Vec<_>, StyleError>>()?;
        Ok(resolved)
    }

    fn fold_styles(&self, offset: usize, resolved: &[Style], base: &Style) -> Style {
        // Covering spans sorted outermost-first; the span list itself is in
        // close order, so ties on (start, end) break toward the later entry.
        let mut covering: Vec<usize> = (0..self.spans.len())
            .filter(|&i| self.spans[i].contains(offset))
            .collect();
        covering.sort_by_key(|&i| (self.spans[i].start, Reverse(self.spans[i].end), Reverse(i)));

        let mut style = base.clone();
        for i in covering {
            style = style.apply(&resolved[i]);
        }
        style
    }
}
