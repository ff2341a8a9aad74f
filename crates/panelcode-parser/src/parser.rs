//! Grammar for Panelcode source text.
//!
//! The grammar is five nested delimited lists, one per [`Level`], each
//! followed by an optional option block for the node it closes:
//!
//! ```text
//! document    = ws gallery ("@" gallery)* options(document)? ws
//! gallery     = spread (";" spread)* options(gallery)?
//! spread      = layout ("|" layout)* options(spread)?
//! layout      = panel_group ("_" panel_group)* options(layout)?
//! panel_group = ("(" terms ")" | terms) options(panel_group)?
//! terms       = unit (("+" | ",") unit)*
//! unit        = count attribute* | attribute+
//! attribute   = "."? (pair | shorthand | word)
//! ```
//!
//! Whitespace is accepted between any two tokens. The public entry point is
//! [`parse_document`].

use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, cut_err, delimited, not, opt, peek, preceded, repeat, separated, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_while},
};

use panelcode_core::{
    attribute::Attribute,
    level::Level,
    model::{Document, Gallery, Layout, MAX_PANEL_COUNT, PanelGroup, Spread, Term, Unit},
    options::OptionSet,
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

/// Diagnostic information attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SyntaxContext {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
    /// Secondary label drawn at the error position, for constructs that were
    /// opened but never closed.
    expected: Option<&'static str>,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<SyntaxContext>>;

/// Build a backtracking error carrying `context`.
fn backtrack_with(input: &Input<'_>, context: SyntaxContext) -> ErrMode<ContextError<SyntaxContext>> {
    ErrMode::Backtrack(ContextError::new().add_context(input, &input.checkpoint(), context))
}

/// Build a committed error carrying `context`.
fn cut_with(input: &Input<'_>, context: SyntaxContext) -> ErrMode<ContextError<SyntaxContext>> {
    ErrMode::Cut(ContextError::new().add_context(input, &input.checkpoint(), context))
}

/// Characters allowed after the first letter of a word.
fn is_term_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Characters allowed in an unquoted value inside an option block, where
/// only `}` and whitespace end the value.
fn is_block_value_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':')
}

/// Skip any amount of whitespace, including newlines.
fn ws(input: &mut Input<'_>) -> IResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// A word: an ASCII letter followed by letters, digits or hyphens.
fn term<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., is_term_char),
    )
        .take()
        .parse_next(input)
}

/// A single-quoted value. No escapes; the value ends at the next `'`.
fn quoted_value<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    let start = input.current_token_start();

    preceded(
        '\'',
        cut_err(terminated(take_while(0.., |c: char| c != '\''), '\'')).context(
            SyntaxContext {
                code: ErrorCode::E106,
                message: "unterminated quoted value",
                help: Some("add a closing `'`"),
                start,
                expected: Some("expected a closing `'`"),
            },
        ),
    )
    .parse_next(input)
}

/// An unquoted value next to a unit. Delimiters and `.` end it.
fn unit_value<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., is_term_char).parse_next(input)
}

/// An unquoted value inside an option block, such as `img=a.png:b.png`.
fn block_value<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., is_block_value_char).parse_next(input)
}

type ValueParser<'a> = fn(&mut Input<'a>) -> IResult<&'a str>;

/// `key=value` or `key='quoted value'`.
fn pair<'a>(input: &mut Input<'a>, bare_value: ValueParser<'a>) -> IResult<Attribute> {
    let start = input.current_token_start();

    let key = terminated(term, (ws, '=', ws)).parse_next(input)?;

    // Committed once the `=` is seen.
    let value = cut_err(alt((quoted_value, bare_value)))
        .context(SyntaxContext {
            code: ErrorCode::E100,
            message: "expected attribute value",
            help: Some("write `key=value` or `key='quoted value'`"),
            start,
            expected: None,
        })
        .parse_next(input)?;

    Ok(Attribute::pair(key, value))
}

/// One letter immediately followed by digits and a word boundary: `c2`,
/// `w12`. Longer runs such as `micro2` are words.
fn shorthand(input: &mut Input<'_>) -> IResult<Attribute> {
    terminated(
        (one_of(|c: char| c.is_ascii_alphabetic()), digit1),
        peek(not(one_of(is_term_char))),
    )
    .map(|(key, digits): (char, &str)| Attribute::shorthand(key.to_string(), digits))
    .parse_next(input)
}

fn word(input: &mut Input<'_>) -> IResult<Attribute> {
    term.map(|word: &str| Attribute::word(word))
        .parse_next(input)
}

/// One attribute token, tried in order pair, shorthand, word. A leading `.`
/// separator may be followed by whitespace.
fn attribute_with<'a>(input: &mut Input<'a>, bare_value: ValueParser<'a>) -> IResult<Attribute> {
    preceded(
        (opt('.'), ws),
        alt((|input: &mut Input<'a>| pair(input, bare_value), shorthand, word)),
    )
    .parse_next(input)
}

/// An attribute attached to a unit.
fn attribute(input: &mut Input<'_>) -> IResult<Attribute> {
    attribute_with(input, unit_value)
}

/// An attribute inside an option block.
fn block_attribute(input: &mut Input<'_>) -> IResult<Attribute> {
    attribute_with(input, block_value)
}

/// Parse the marker after `{` into the level the block belongs to.
///
/// The colon run is taken whole, so `{::` is never read as `{:` followed by
/// a stray colon.
fn option_marker(input: &mut Input<'_>) -> IResult<Level> {
    alt((
        one_of(|c: char| Level::from_alternate_marker(c).is_some())
            .verify_map(Level::from_alternate_marker),
        take_while(0.., ':').verify_map(|colons: &str| Level::from_depth(colons.len())),
    ))
    .parse_next(input)
}

/// Parse an option block for `level`.
///
/// Backtracks without consuming input when the block belongs to another
/// level, so an enclosing node can claim it.
fn option_block(input: &mut Input<'_>, level: Level) -> IResult<OptionSet> {
    let start = input.current_token_start();

    let marker = preceded('{', option_marker).parse_next(input)?;
    if marker != level {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }

    let attributes: Vec<Attribute> =
        cut_err(terminated(repeat(0.., preceded(ws, block_attribute)), (ws, '}')))
            .context(SyntaxContext {
                code: ErrorCode::E103,
                message: "unterminated option block",
                help: Some("option blocks hold attributes and end with `}`"),
                start,
                expected: Some("expected `}`"),
            })
            .parse_next(input)?;

    Ok(OptionSet::resolve(&attributes))
}

/// Parse the option block that may close a node of `level`.
fn trailing_options<'a>(input: &mut Input<'a>, level: Level) -> IResult<OptionSet> {
    let options = opt(preceded(ws, |input: &mut Input<'a>| option_block(input, level)))
        .parse_next(input)?;
    Ok(options.unwrap_or_default())
}

/// Whitespace-padded delimiter between the children of `level`.
fn separator<'a>(level: Level) -> impl winnow::Parser<Input<'a>, (), ErrMode<ContextError<SyntaxContext>>> {
    (ws, one_of(level.child_delimiters()), ws).void()
}

fn panel_count(input: &mut Input<'_>) -> IResult<u32> {
    let start = input.current_token_start();
    let digits: &str = digit1.parse_next(input)?;

    digits
        .parse::<u32>()
        .ok()
        .filter(|count| *count <= MAX_PANEL_COUNT)
        .ok_or_else(|| {
            cut_with(
                input,
                SyntaxContext {
                    code: ErrorCode::E105,
                    message: "panel count out of range",
                    help: Some("a unit holds at most 999 panels; split larger runs with `+`"),
                    start,
                    expected: None,
                },
            )
        })
}

/// A panel count, attributes, or both.
fn unit(input: &mut Input<'_>) -> IResult<Unit> {
    let start = input.current_token_start();

    let count = opt(panel_count).parse_next(input)?;
    let attributes: Vec<Attribute> = repeat(0.., preceded(ws, attribute)).parse_next(input)?;

    if count.is_none() && attributes.is_empty() {
        let context = if input.is_empty() {
            SyntaxContext {
                code: ErrorCode::E101,
                message: "unexpected end of input",
                help: Some("a panel unit such as `1`, `2c2` or `x` is required here"),
                start,
                expected: None,
            }
        } else {
            SyntaxContext {
                code: ErrorCode::E102,
                message: "expected panel unit",
                help: Some("a unit is a panel count, attributes such as `r2`, or both"),
                start,
                expected: None,
            }
        };
        return Err(backtrack_with(input, context));
    }

    Ok(Unit::new(count, attributes))
}

fn term_separator(input: &mut Input<'_>) -> IResult<Term> {
    alt(('+'.value(Term::NextColumn), ','.value(Term::NextRow))).parse_next(input)
}

/// Units joined by `+` and `,`.
fn terms(input: &mut Input<'_>) -> IResult<Vec<Term>> {
    let first = unit.parse_next(input)?;
    let rest: Vec<(Term, Unit)> =
        repeat(0.., (delimited(ws, term_separator, ws), cut_err(unit))).parse_next(input)?;

    let mut terms = Vec::with_capacity(rest.len() * 2 + 1);
    terms.push(Term::Unit(first));
    for (separator, unit) in rest {
        terms.push(separator);
        terms.push(Term::Unit(unit));
    }
    Ok(terms)
}

fn parenthesized_terms(input: &mut Input<'_>) -> IResult<Vec<Term>> {
    let start = input.current_token_start();

    preceded(
        '(',
        cut_err(delimited(ws, terms, (ws, ')'))).context(SyntaxContext {
            code: ErrorCode::E104,
            message: "unclosed parenthesis",
            help: Some("close the panel group with `)` before its option block"),
            start,
            expected: Some("expected `)`"),
        }),
    )
    .parse_next(input)
}

fn panel_group(input: &mut Input<'_>) -> IResult<PanelGroup> {
    let terms = alt((parenthesized_terms, terms)).parse_next(input)?;
    let options = trailing_options(input, Level::PanelGroup)?;
    Ok(PanelGroup::new(terms, options))
}

fn layout(input: &mut Input<'_>) -> IResult<Layout> {
    let panel_groups: Vec<PanelGroup> =
        separated(1.., cut_err(panel_group), separator(Level::Layout)).parse_next(input)?;
    let options = trailing_options(input, Level::Layout)?;
    Ok(Layout::new(panel_groups, options))
}

fn spread(input: &mut Input<'_>) -> IResult<Spread> {
    let layouts: Vec<Layout> =
        separated(1.., cut_err(layout), separator(Level::Spread)).parse_next(input)?;
    let options = trailing_options(input, Level::Spread)?;
    Ok(Spread::new(layouts, options))
}

fn gallery(input: &mut Input<'_>) -> IResult<Gallery> {
    let spreads: Vec<Spread> =
        separated(1.., cut_err(spread), separator(Level::Gallery)).parse_next(input)?;
    let options = trailing_options(input, Level::Gallery)?;
    Ok(Gallery::new(spreads, options))
}

fn document(input: &mut Input<'_>) -> IResult<Document> {
    let galleries: Vec<Gallery> = preceded(
        ws,
        separated(1.., cut_err(gallery), separator(Level::Document)),
    )
    .parse_next(input)?;
    let options = trailing_options(input, Level::Document)?;
    ws.parse_next(input)?;
    Ok(Document::new(galleries, options))
}

/// Span of the character at `offset`, or an empty span at end of input.
fn char_span(source: &str, offset: usize) -> Span {
    let width = source
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    Span::new(offset..offset + width)
}

/// Convert a winnow error and the position it stopped at into a diagnostic.
///
/// The innermost [`SyntaxContext`] wins. Without context the error is an
/// unexpected character at `error_pos`.
fn convert_err_mode(
    err: ErrMode<ContextError<SyntaxContext>>,
    source: &str,
    error_pos: usize,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(SyntaxContext {
        code,
        message,
        help,
        start,
        expected,
    }) = context_error.context().next()
    {
        let span = if error_pos > *start {
            Span::new(*start..error_pos)
        } else {
            char_span(source, *start)
        };

        let mut diag = Diagnostic::error(*message)
            .with_code(*code)
            .with_label(span, code.description());
        if let Some(expected) = expected.filter(|_| error_pos > *start) {
            diag = diag.with_secondary_label(char_span(source, error_pos), expected);
        }
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    unexpected_character(source, error_pos)
}

/// Diagnostic for input left over after a complete document.
fn unexpected_character(source: &str, offset: usize) -> Diagnostic {
    let found = source.get(offset..).and_then(|rest| rest.chars().next());
    let message = match found {
        Some(c) => format!("unexpected character `{c}`"),
        None => ErrorCode::E101.description().to_string(),
    };
    let help = match found {
        Some('{') => "option blocks follow their node, from `{` for a panel group up to `{::::` for the document",
        Some(')') => "this `)` has no matching `(`",
        _ => "units are joined by `+` or `,`; larger nodes by `_`, `|`, `;` and `@`",
    };

    Diagnostic::error(message)
        .with_code(ErrorCode::E100)
        .with_label(char_span(source, offset), ErrorCode::E100.description())
        .with_help(help)
}

/// Parse a complete Panelcode document.
///
/// Fails on the first syntax error, or when input remains after the last
/// node that could be parsed.
pub(crate) fn parse_document(source: &str) -> Result<Document, ParseError> {
    let mut input = LocatingSlice::new(source);

    match document.parse_next(&mut input) {
        Ok(document) if input.is_empty() => Ok(document),
        Ok(_) => Err(unexpected_character(source, input.current_token_start()).into()),
        Err(err) => Err(convert_err_mode(err, source, input.current_token_start()).into()),
    }
}
