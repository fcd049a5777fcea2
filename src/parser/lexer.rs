//! Tokenizer for the bracketed-tag grammar.
//!
//! A tag is `[`, a first character in `[a-z#/@]`, then anything except `[`
//! up to the first `]`. Brackets that do not form a tag are literal text.
//! Backslashes immediately before a tag escape it: each pair collapses to
//! one literal backslash, and an odd count turns the tag into literal text.

/// A token produced by [`tokenize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text content.
    Text(&'a str),
    /// Opening tag content (without brackets): `bold red`.
    Open(&'a str),
    /// Closing tag content (without brackets or slash): `bold red`.
    /// Empty for `[/]`.
    Close(&'a str),
}

/// Split input into literal-text and tag tokens.
///
/// Lexing never fails: malformed brackets are literal text. Escaped
/// backslashes are emitted as separate text tokens borrowed from the
/// input, so positions never need adjusting.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0; // start of the pending literal run
    let mut cursor = 0;

    while cursor < bytes.len() {
        if bytes[cursor] == b'[' {
            if let Some((tag, after)) = scan_tag(input, cursor) {
                // Backslashes immediately before the bracket, within the
                // pending literal run.
                let mut backslashes = 0;
                while cursor - backslashes > start && bytes[cursor - backslashes - 1] == b'\\' {
                    backslashes += 1;
                }
                let literal_end = cursor - backslashes;
                if literal_end > start {
                    tokens.push(Token::Text(&input[start..literal_end]));
                }
                let keep = backslashes / 2;
                if keep > 0 {
                    tokens.push(Token::Text(&input[literal_end..literal_end + keep]));
                }
                if backslashes % 2 == 1 {
                    // Odd count: the tag itself is literal text.
                    tokens.push(Token::Text(&input[cursor..after]));
                } else if let Some(name) = tag.strip_prefix('/') {
                    tokens.push(Token::Close(name));
                } else {
                    tokens.push(Token::Open(tag));
                }
                start = after;
                cursor = after;
                continue;
            }
        }
        cursor += 1;
    }

    if start < input.len() {
        tokens.push(Token::Text(&input[start..]));
    }
    tokens
}

/// Try to read a tag starting at the `[` at `at`; returns the tag content
/// and the offset just past the closing `]`.
fn scan_tag(input: &str, at: usize) -> Option<(&str, usize)> {
    let bytes = input.as_bytes();
    let first = *bytes.get(at + 1)?;
    if !(first.is_ascii_lowercase() || first == b'#' || first == b'@' || first == b'/') {
        return None;
    }
    let mut i = at + 1;
    while i < bytes.len() {
        match bytes[i] {
            b']' => return Some((&input[at + 1..i], i + 1)),
            b'[' => return None,
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text() {
        assert_eq!(tokenize("Hello World"), vec![Token::Text("Hello World")]);
    }

    #[test]
    fn open_and_close() {
        assert_eq!(
            tokenize("[bold]Hello[/bold]"),
            vec![Token::Open("bold"), Token::Text("Hello"), Token::Close("bold")]
        );
    }

    #[test]
    fn bare_close() {
        assert_eq!(tokenize("[/]"), vec![Token::Close("")]);
    }

    #[test]
    fn uppercase_bracket_is_literal() {
        assert_eq!(tokenize("[X]y"), vec![Token::Text("[X]y")]);
    }

    #[test]
    fn unterminated_bracket_is_literal() {
        assert_eq!(tokenize("[bold"), vec![Token::Text("[bold")]);
    }

    #[test]
    fn nested_open_bracket_is_literal() {
        assert_eq!(tokenize("[a[b]"), vec![Token::Text("[a"), Token::Open("b")]);
    }

    #[test]
    fn odd_backslashes_escape_the_tag() {
        assert_eq!(
            tokenize(r"\[a]x"),
            vec![Token::Text("[a]"), Token::Text("x")]
        );
    }

    #[test]
    fn backslash_pairs_collapse() {
        assert_eq!(
            tokenize(r"\\[a]x"),
            vec![Token::Text(r"\"), Token::Open("a"), Token::Text("x")]
        );
        assert_eq!(
            tokenize(r"\\\[a]x"),
            vec![Token::Text(r"\"), Token::Text("[a]"), Token::Text("x")]
        );
    }

    #[test]
    fn backslash_without_tag_is_literal() {
        assert_eq!(tokenize(r"a \ b"), vec![Token::Text(r"a \ b")]);
    }

    #[test]
    fn hash_and_at_tags() {
        assert_eq!(
            tokenize("[#ff0000]x[/#ff0000]"),
            vec![
                Token::Open("#ff0000"),
                Token::Text("x"),
                Token::Close("#ff0000")
            ]
        );
    }

    #[test]
    fn unicode_text_passes_through() {
        assert_eq!(
            tokenize("[bold]日本語[/bold]"),
            vec![Token::Open("bold"), Token::Text("日本語"), Token::Close("bold")]
        );
    }
}
