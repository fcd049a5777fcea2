//! Markup parsers.
//!
//! Two independent grammars: the bracketed-tag form (`[bold]...[/bold]`,
//! lexer + stack parser) and the backtick form with an optional attribute
//! prefix and color suffix (single-pass tokenizer with silent degrade).

mod inline;
mod lexer;
mod markup;

pub use inline::{inline_segments, render_inline, strip_inline};
pub use lexer::{Token, tokenize};
pub use markup::parse;
