//! Comment removal ahead of parsing.
//!
//! Panelcode files may carry `// line`, `# line` and `/* block */` comments.
//! Comments are blanked out rather than cut, so every byte offset reported
//! by the parser still points at the same place in the original file.

use winnow::{
    Parser as _,
    combinator::{alt, opt, repeat},
    error::{ContextError, ModalResult},
    stream::LocatingSlice,
    token::{any, rest, take_till, take_until, take_while},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

/// A run of source text.
enum Segment<'a> {
    Kept(&'a str),
    Comment(&'a str),
}

/// `// ...` or `# ...` up to, not including, the newline.
fn line_comment<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (alt(("//", "#")), take_while(0.., |c: char| c != '\n'))
        .take()
        .parse_next(input)
}

/// `/* ... */`. An unterminated block comment runs to the end of the input.
fn block_comment<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (
        "/*",
        alt(((take_until(0.., "*/"), "*/").void(), rest.void())),
    )
        .take()
        .parse_next(input)
}

/// A single-quoted value, copied as written. Quotes have no escapes, so the
/// value ends at the next `'`.
fn quoted<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    ('\'', take_till(0.., '\''), opt('\''))
        .take()
        .parse_next(input)
}

/// Text up to the next character that may open a comment or a quote.
fn plain<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_till(1.., |c: char| matches!(c, '\'' | '/' | '#')).parse_next(input)
}

fn segment<'a>(input: &mut Input<'a>) -> IResult<Segment<'a>> {
    alt((
        line_comment.map(Segment::Comment),
        block_comment.map(Segment::Comment),
        quoted.map(Segment::Kept),
        plain.map(Segment::Kept),
        // A lone `/`.
        any.take().map(Segment::Kept),
    ))
    .parse_next(input)
}

/// Push as many spaces as `text` occupies in UTF-8, keeping newlines.
fn blank(output: &mut String, text: &str) {
    for ch in text.chars() {
        if ch == '\n' {
            output.push('\n');
        } else {
            output.extend(std::iter::repeat_n(' ', ch.len_utf8()));
        }
    }
}

/// Replace comments outside quoted values with spaces.
///
/// Newlines inside block comments are kept, so line numbers do not move
/// either. `label='#1'` is a value, not a comment.
///
/// # Examples
///
/// ```
/// use panelcode_parser::strip_comments;
///
/// assert_eq!(strip_comments("2+1 // cover"), "2+1         ");
/// ```
pub fn strip_comments(source: &str) -> String {
    let stripped = repeat(0.., segment)
        .fold(
            || String::with_capacity(source.len()),
            |mut output, segment| {
                match segment {
                    Segment::Kept(text) => output.push_str(text),
                    Segment::Comment(text) => blank(&mut output, text),
                }
                output
            },
        )
        .parse(LocatingSlice::new(source));

    // Every character starts some segment, so the fold always reaches the end.
    stripped.unwrap_or_else(|_| source.to_owned())
}
