//! Stack parser for the bracketed-tag grammar.

use crate::error::MarkupError;
use crate::markup::Markup;
use crate::span::Span;

use super::lexer::{Token, tokenize};

/// Parse bracketed-tag markup into plain text and spans.
///
/// Opening tags push (position, name); a closing tag must name the nearest
/// open tag and pops it into a span. Tags still open at end of input are
/// closed implicitly at the final position.
pub fn parse(source: &str) -> Result<Markup, MarkupError> {
    let mut text = String::new();
    let mut stack: Vec<(usize, &str)> = Vec::new();
    let mut spans: Vec<Span> = Vec::new();

    for token in tokenize(source) {
        match token {
            Token::Text(chunk) => text.push_str(chunk),
            Token::Open(tag) => stack.push((text.len(), tag)),
            Token::Close(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(MarkupError::EmptyCloseTag);
                }
                let Some((start, open_tag)) = stack.pop() else {
                    return Err(MarkupError::UnmatchedCloseTag(name.to_string()));
                };
                if name != open_tag.trim() {
                    return Err(MarkupError::MismatchedTag {
                        open: open_tag.to_string(),
                        close: name.to_string(),
                    });
                }
                spans.push(Span::new(start, text.len(), open_tag));
            }
        }
    }

    if !stack.is_empty() {
        log::trace!("auto-closing {} dangling markup tag(s)", stack.len());
    }
    let end = text.len();
    while let Some((start, tag)) = stack.pop() {
        spans.push(Span::new(start, end, tag));
    }

    Ok(Markup::new(text, spans))
}
