//! Error types for color, style and markup parsing.

use thiserror::Error;

/// Errors that can occur when resolving a color value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Value matches none of the recognized color forms.
    #[error("not a valid color: {0:?}")]
    Invalid(String),

    /// Hex literal with bad digits or a bad length.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// Integer sequence with the wrong length or out-of-range components.
    #[error("invalid color triple: {0:?}")]
    InvalidTriple(Vec<i64>),
}

/// Errors that can occur when parsing a style expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// `on` must be immediately followed by a color token.
    #[error("color expected after 'on'")]
    MissingBackground,

    /// The token following `on` does not validate as a color.
    #[error("unable to parse {0:?} as background color")]
    InvalidBackground(String),

    /// A token that is neither an attribute keyword nor a color.
    #[error("unable to parse {0:?} as color")]
    UnknownToken(String),

    /// A color token validated but failed to resolve.
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Errors raised by the bracketed-tag markup grammar.
///
/// The backtick grammar never raises; unknown tokens there degrade to the
/// raw text instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// Closing tag `[/]` with no name.
    #[error("closing tag without any content")]
    EmptyCloseTag,

    /// Closing tag with no open tag left on the stack.
    #[error("closing tag {0:?} has no matching open tag")]
    UnmatchedCloseTag(String),

    /// Closing tag that does not name the nearest open tag.
    #[error("closing tag {close:?} does not match open tag {open:?}")]
    MismatchedTag { open: String, close: String },

    /// A span's style string failed to resolve.
    #[error("invalid style in span: {0}")]
    Style(#[from] StyleError),
}
