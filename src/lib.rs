//! Styled text for terminal output.
//!
//! This crate resolves inline color/attribute markup into ANSI escape
//! sequences, and fits tabular column widths into a bounded display budget.
//!
//! # Markup
//!
//! Two independent grammars are supported. The bracketed-tag form nests and
//! produces styled spans:
//!
//! ```
//! use pigment::{ColorMode, Markup};
//!
//! let markup = Markup::parse("[bold red]Error:[/bold red] disk full").unwrap();
//! assert_eq!(markup.text(), "Error: disk full");
//! let segments = markup.segments(ColorMode::EightBit).unwrap();
//! assert_eq!(segments.len(), 2);
//! ```
//!
//! The backtick form styles a single delimited run and tolerates text that
//! merely looks like markup:
//!
//! ```
//! use pigment::{ColorMode, render_inline};
//!
//! let out = render_inline("found `3 errors`<red>", ColorMode::EightBit);
//! assert_eq!(out, "found \x1b[38;5;196m3 errors\x1b[0m");
//! ```
//!
//! # Styles and colors
//!
//! A [`Style`] is parsed from a `[color] [on color] [attribute]*`
//! expression and composes right-biased: attributes the overlay touches
//! win, the rest survive from the base.
//!
//! ```
//! use pigment::{Attributes, ColorMode, Style};
//!
//! let base = Style::parse("bold red", ColorMode::EightBit).unwrap();
//! let overlay = Style::new().bold(false);
//! assert!(!base.apply(&overlay).is_on(Attributes::BOLD));
//! ```
//!
//! # Table widths
//!
//! [`collapse_widths`] shrinks the widest shrinkable columns first,
//! converging toward parity:
//!
//! ```
//! use pigment::collapse_widths;
//!
//! let fitted = collapse_widths(&[10, 10, 10], &[true, true, true], 24);
//! assert_eq!(fitted, vec![8, 8, 8]);
//! ```
//!
//! Line wrapping, wide-character width accounting and device output are
//! the consuming renderer's concern; this crate stops at (text, style)
//! segments and escape strings.

pub mod color;
pub mod error;
pub mod markup;
pub mod palette;
pub mod parser;
pub mod segment;
pub mod span;
pub mod style;
pub mod width;

pub use color::{Color, ColorMode, Layer, Rgb};
pub use error::{ColorError, MarkupError, StyleError};
pub use markup::Markup;
pub use parser::{inline_segments, render_inline, strip_inline};
pub use segment::Segment;
pub use span::Span;
pub use style::{Attributes, RESET, Style, strip_ansi};
pub use width::{collapse_widths, ratio_reduce};
