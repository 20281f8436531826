//! The `{...}` annotation syntax
//!
//! Subtexts such as `"I:{0603}"` mix two fonts: text outside braces is *plain*, text inside is an
//! *annotation*. There is no validation; unbalanced braces simply shift which pieces end up
//! plain and which annotated.

use std::iter;

/// Which font a segment is set in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Outside braces
    Plain,
    /// Inside braces
    Annotation,
}

/// One run of text in a single font
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The text, possibly empty
    pub text: &'a str,
    /// Plain or annotation
    pub kind: SegmentKind,
}

/// Splits `text` into alternating plain (even indices) and annotation (odd indices) pieces.
///
/// The text is split on every `{`; the first piece is plain and each later piece is split again
/// on `}`. Empty pieces are kept so the alternation holds, except at the very end where they
/// carry nothing. At least one piece is always returned.
///
/// ```
/// # use tapelabel::render::markup::parse;
/// assert_eq!(parse("I:{0603}"), ["I:", "0603"]);
/// assert_eq!(parse("plain"), ["plain"]);
/// assert_eq!(parse("{a}{b}"), ["", "a", "", "b"]);
/// ```
#[must_use]
pub fn parse(text: &str) -> Vec<&str> {
    let mut chunks = text.split('{');
    let first = chunks.next().unwrap_or_default();
    let mut pieces: Vec<&str> = iter::once(first)
        .chain(chunks.flat_map(|chunk| chunk.split('}')))
        .collect();
    while pieces.len() > 1 && pieces.last().is_some_and(|piece| piece.is_empty()) {
        pieces.pop();
    }
    pieces
}

/// [`parse`], with each piece tagged by its kind.
pub fn segments(text: &str) -> impl Iterator<Item = Segment<'_>> {
    parse(text)
        .into_iter()
        .enumerate()
        .map(|(index, text)| Segment {
            text,
            kind: if index % 2 == 0 {
                SegmentKind::Plain
            } else {
                SegmentKind::Annotation
            },
        })
}
