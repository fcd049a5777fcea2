//! Tests for the bracketed-tag grammar and span resolution.

use pigment::{Attributes, ColorMode, Markup, MarkupError, Span};

const MODE: ColorMode = ColorMode::EightBit;

// ============================================================================
// Spans
// ============================================================================

#[test]
fn single_tag_yields_single_span() {
    let markup = Markup::parse("[a]x[/a]").unwrap();
    assert_eq!(markup.text(), "x");
    assert_eq!(markup.spans(), &[Span::new(0, 1, "a")]);
}

#[test]
fn unclosed_tag_closes_at_end_of_input() {
    let markup = Markup::parse("[a]x").unwrap();
    assert_eq!(markup.spans(), &[Span::new(0, 1, "a")]);
}

#[test]
fn spans_cover_byte_ranges_of_plain_text() {
    let markup = Markup::parse("say [bold]hello[/bold] twice").unwrap();
    assert_eq!(markup.text(), "say hello twice");
    assert_eq!(markup.spans(), &[Span::new(4, 9, "bold")]);
}

#[test]
fn nested_tags_close_inner_first() {
    let markup = Markup::parse("[red]a[bold]b[/bold]c[/red]").unwrap();
    assert_eq!(
        markup.spans(),
        &[Span::new(1, 2, "bold"), Span::new(0, 3, "red")]
    );
}

#[test]
fn multiple_unclosed_tags_all_close_at_end() {
    let markup = Markup::parse("[red]a[bold]b").unwrap();
    assert_eq!(
        markup.spans(),
        &[Span::new(1, 2, "bold"), Span::new(0, 2, "red")]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn mismatched_nesting_is_an_error() {
    assert!(matches!(
        Markup::parse("[a]x[/b]"),
        Err(MarkupError::MismatchedTag { .. })
    ));
    assert!(matches!(
        Markup::parse("[a][b]x[/a][/b]"),
        Err(MarkupError::MismatchedTag { .. })
    ));
}

#[test]
fn close_without_open_is_an_error() {
    assert!(matches!(
        Markup::parse("[/a]"),
        Err(MarkupError::UnmatchedCloseTag(_))
    ));
}

#[test]
fn empty_close_tag_is_an_error() {
    assert!(matches!(
        Markup::parse("[bold]x[/]"),
        Err(MarkupError::EmptyCloseTag)
    ));
}

// ============================================================================
// Escapes and literal brackets
// ============================================================================

#[test]
fn escaped_tag_is_literal_text() {
    let markup = Markup::parse(r"\[bold]x").unwrap();
    assert_eq!(markup.text(), "[bold]x");
    assert!(markup.is_plain());
}

#[test]
fn backslash_pairs_collapse_before_tags() {
    let markup = Markup::parse(r"\\[bold]x[/bold]").unwrap();
    assert_eq!(markup.text(), r"\x");
    assert_eq!(markup.spans(), &[Span::new(1, 2, "bold")]);
}

#[test]
fn non_tag_brackets_are_literal() {
    let markup = Markup::parse("[X] and [123]").unwrap();
    assert_eq!(markup.text(), "[X] and [123]");
    assert!(markup.is_plain());
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn segments_carry_resolved_styles() {
    let markup = Markup::parse("[bold red]Error:[/bold red] disk full").unwrap();
    let segments = markup.segments(MODE).unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text(), "Error:");
    assert!(segments[0].style().is_on(Attributes::BOLD));
    assert_eq!(segments[0].style().fg().unwrap().hex(), "#FF0000");
    assert_eq!(segments[1].text(), " disk full");
    assert!(segments[1].style().is_null());
}

#[test]
fn nested_segments_compose_inner_over_outer() {
    let markup = Markup::parse("[red]a[bold green]b[/bold green]c[/red]").unwrap();
    let segments = markup.segments(MODE).unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].style().fg().unwrap().hex(), "#FF0000");
    assert!(segments[1].style().is_on(Attributes::BOLD));
    assert_eq!(segments[1].style().fg().unwrap().hex(), "#008000");
    assert_eq!(segments[2].style().fg().unwrap().hex(), "#FF0000");
}

#[test]
fn segments_with_layers_over_a_base_style() {
    let base = pigment::Style::parse("dim", MODE).unwrap();
    let markup = Markup::parse("[bold]x[/bold]").unwrap();
    let segments = markup.segments_with(&base, MODE).unwrap();
    assert!(segments[0].style().is_on(Attributes::DIM));
    assert!(segments[0].style().is_on(Attributes::BOLD));
}

#[test]
fn resolution_is_lazy_and_fails_fast() {
    let markup = Markup::parse("[frobnicate]x[/frobnicate]").unwrap();
    assert_eq!(markup.spans().len(), 1);
    assert!(matches!(
        markup.segments(MODE),
        Err(MarkupError::Style(_))
    ));
}

#[test]
fn hex_tags_resolve_as_foreground() {
    let markup = Markup::parse("[#ff0000]x[/#ff0000]").unwrap();
    let segments = markup.segments(MODE).unwrap();
    assert_eq!(segments[0].style().fg().unwrap().hex(), "#ff0000");
}

#[test]
fn render_interleaves_text_and_escapes() {
    let markup = Markup::parse("a[bold]b[/bold]c").unwrap();
    assert_eq!(
        markup.render(MODE).unwrap(),
        "a\x1b[1mb\x1b[0mc"
    );
}
