//! The backtick inline-markup grammar.
//!
//! A match is an optional attribute prefix (one keyword, or a parenthesized
//! comma-separated list), backtick-delimited content, and an optional
//! `<fg,bg>` color suffix:
//!
//! ```text
//! b`This is a string.`<#FF0000,#00FF00>
//! ```
//!
//! A match with no prefix and no colors is returned byte-for-byte
//! unchanged, so literal text that happens to contain backticks is not
//! mangled. Unknown attribute or color tokens degrade the match to its raw
//! text; this grammar never raises.

use crate::color::{Color, ColorMode, Layer};
use crate::segment::Segment;
use crate::style::{Style, attribute_for};

/// One scanned region: literal text, or a markup match.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Event<'a> {
    Text(&'a str),
    Match(InlineMatch<'a>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct InlineMatch<'a> {
    /// The full matched text, prefix and suffix included.
    raw: &'a str,
    /// Attribute prefix as written: `b` or `(bold, underline)`.
    prefix: Option<&'a str>,
    /// Text between the first and last delimiter.
    content: &'a str,
    fg: Option<&'a str>,
    bg: Option<&'a str>,
}

impl InlineMatch<'_> {
    /// Neither prefix nor colors: the deliberate passthrough case.
    fn is_plain(&self) -> bool {
        self.prefix.is_none() && self.fg.is_none() && self.bg.is_none()
    }
}

/// Render inline markup to literal text and escape sequences.
///
/// Every styled run is terminated by a full reset.
///
/// # Examples
///
/// ```
/// use pigment::{ColorMode, render_inline};
///
/// let out = render_inline("b`nice`", ColorMode::EightBit);
/// assert_eq!(out, "\x1b[1mnice\x1b[0m");
///
/// // no prefix, no colors: byte-for-byte passthrough
/// assert_eq!(render_inline("a `day`<> off", ColorMode::EightBit), "a `day`<> off");
/// ```
pub fn render_inline(source: &str, mode: ColorMode) -> String {
    let mut out = String::with_capacity(source.len());
    for event in scan(source) {
        match event {
            Event::Text(text) => out.push_str(text),
            Event::Match(m) => {
                if m.is_plain() {
                    out.push_str(m.raw);
                } else if let Some(style) = resolve(&m, mode) {
                    out.push_str(&style.render(m.content));
                } else {
                    out.push_str(m.raw);
                }
            }
        }
    }
    out
}

/// Remove inline-markup wrappers, keeping the content.
///
/// Mirrors [`render_inline`] exactly: passthrough and degraded matches keep
/// their raw text, so the result is the plain-text view of what rendering
/// would produce.
pub fn strip_inline(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for event in scan(source) {
        match event {
            Event::Text(text) => out.push_str(text),
            Event::Match(m) => {
                if m.is_plain() || resolve(&m, ColorMode::EightBit).is_none() {
                    out.push_str(m.raw);
                } else {
                    out.push_str(m.content);
                }
            }
        }
    }
    out
}

/// Split inline markup into (text, resolved style) segments, layering each
/// match's style over `base`.
pub fn inline_segments(source: &str, base: &Style, mode: ColorMode) -> Vec<Segment> {
    let mut segments = Vec::new();
    for event in scan(source) {
        match event {
            Event::Text(text) => segments.push(Segment::new(text, base.clone())),
            Event::Match(m) => {
                if m.is_plain() {
                    segments.push(Segment::new(m.raw, base.clone()));
                } else if let Some(style) = resolve(&m, mode) {
                    segments.push(Segment::new(m.content, base.apply(&style)));
                } else {
                    segments.push(Segment::new(m.raw, base.clone()));
                }
            }
        }
    }
    segments
}

/// Resolve a match's tokens to a style; `None` degrades the match.
fn resolve(m: &InlineMatch<'_>, mode: ColorMode) -> Option<Style> {
    let mut style = Style::new();
    if let Some(prefix) = m.prefix {
        for word in prefix_words(prefix) {
            style = style.with_attribute(attribute_for(word)?, true);
        }
    }
    if let Some(token) = m.fg {
        style = style.with_fg(resolve_color(token, Layer::Foreground, mode)?);
    }
    if let Some(token) = m.bg {
        style = style.with_bg(resolve_color(token, Layer::Background, mode)?);
    }
    Some(style)
}

fn prefix_words(prefix: &str) -> impl Iterator<Item = &str> {
    let inner = prefix
        .strip_prefix('(')
        .and_then(|p| p.strip_suffix(')'))
        .unwrap_or(prefix);
    inner.split(',').map(str::trim).filter(|w| !w.is_empty())
}

fn resolve_color(token: &str, layer: Layer, mode: ColorMode) -> Option<Color> {
    if Color::is_color(token) {
        Color::new(token, layer, mode).ok()
    } else {
        None
    }
}

/// Scan the source into literal runs and matches.
fn scan(source: &str) -> Vec<Event<'_>> {
    let bytes = source.as_bytes();
    let mut events = Vec::new();
    let mut start = 0;
    let mut cursor = 0;

    while cursor < bytes.len() {
        if bytes[cursor] == b'`' {
            if let Some((match_start, match_end, m)) = try_match(source, start, cursor) {
                if match_start > start {
                    events.push(Event::Text(&source[start..match_start]));
                }
                events.push(Event::Match(m));
                start = match_end;
                cursor = match_end;
                continue;
            }
        }
        cursor += 1;
    }

    if start < source.len() {
        events.push(Event::Text(&source[start..]));
    }
    events
}

/// Try to read a match whose opening delimiter is the backtick at `open`.
/// `floor` bounds the prefix back-scan to the pending literal run.
fn try_match<'a>(
    source: &'a str,
    floor: usize,
    open: usize,
) -> Option<(usize, usize, InlineMatch<'a>)> {
    let bytes = source.as_bytes();

    // Leading consecutive backticks belong to the content. The closing
    // delimiter is the last backtick of the next run; with no later run,
    // the leading run itself must supply it.
    let mut i = open + 1;
    while i < bytes.len() && bytes[i] == b'`' {
        i += 1;
    }
    let close = if let Some(j) = next_backtick(bytes, i) {
        let mut k = j;
        while k + 1 < bytes.len() && bytes[k + 1] == b'`' {
            k += 1;
        }
        k
    } else if i - open >= 2 {
        i - 1
    } else {
        return None;
    };
    let content = &source[open + 1..close];
    let mut end = close + 1;

    // Optional <fg[,bg]> suffix; a malformed suffix is not part of the
    // match.
    let mut fg = None;
    let mut bg = None;
    if bytes.get(end) == Some(&b'<') {
        if let Some(rel) = source[end..].find('>') {
            if let Some((suffix_fg, suffix_bg)) = parse_suffix(&source[end + 1..end + rel]) {
                fg = suffix_fg;
                bg = suffix_bg;
                end = end + rel + 1;
            }
        }
    }

    // Optional attribute prefix immediately before the opening delimiter.
    let mut match_start = open;
    let mut prefix = None;
    if open > floor {
        if bytes[open - 1] == b')' {
            if let Some(p) = scan_paren_prefix(bytes, floor, open) {
                prefix = Some(&source[p..open]);
                match_start = p;
            }
        }
        if prefix.is_none() {
            let mut p = open;
            while p > floor && bytes[p - 1].is_ascii_lowercase() {
                p -= 1;
            }
            if p < open {
                prefix = Some(&source[p..open]);
                match_start = p;
            }
        }
    }

    let m = InlineMatch {
        raw: &source[match_start..end],
        prefix,
        content,
        fg,
        bg,
    };
    Some((match_start, end, m))
}

fn next_backtick(bytes: &[u8], from: usize) -> Option<usize> {
    bytes[from..].iter().position(|&b| b == b'`').map(|i| from + i)
}

/// Walk back from the `)` before the opening delimiter to its `(`.
/// The interior must be non-empty and drawn from lowercase letters,
/// whitespace and commas.
fn scan_paren_prefix(bytes: &[u8], floor: usize, open: usize) -> Option<usize> {
    let mut p = open - 1;
    while p > floor {
        p -= 1;
        match bytes[p] {
            b'(' => return (open - 2 > p).then_some(p),
            b'a'..=b'z' | b',' | b' ' | b'\t' | b'\n' | b'\r' => {}
            _ => return None,
        }
    }
    None
}

/// Parse the interior of a `<...>` suffix into fg/bg tokens.
fn parse_suffix(inner: &str) -> Option<(Option<&str>, Option<&str>)> {
    if inner.is_empty() {
        return Some((None, None));
    }
    let (fg, bg) = match inner.split_once(',') {
        Some((fg, bg)) => (fg, Some(bg)),
        None => (inner, None),
    };
    let fg = if fg.is_empty() {
        None
    } else if is_color_token(fg) {
        Some(fg)
    } else {
        return None;
    };
    let bg = match bg {
        None => None,
        Some(token) if is_color_token(token) => Some(token),
        Some(_) => return None,
    };
    Some((fg, bg))
}

/// A name token or a 6-digit hex literal. Form only; whether a name is in
/// the palette is checked at resolution.
fn is_color_token(token: &str) -> bool {
    if let Some(hex) = token.strip_prefix('#') {
        hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit())
    } else {
        !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_')
    }
}
