use winnow::combinator::{alt, cut_err, not, opt, repeat};
use winnow::error::{ContextError, ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::{Combinator, RuleTerm};

use super::parser::ParsedRule;

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Whitespace plus grouping parentheses, which carry no meaning.
fn filler(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| {
        c.is_ascii_whitespace() || c == '(' || c == ')'
    })
    .void()
    .parse_next(input)
}

// -- Identifiers ------------------------------------------------------------

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A keyword in upper or lower case that is not the prefix of a longer word.
fn keyword<'i>(
    upper: &'static str,
    lower: &'static str,
) -> impl Parser<&'i str, (), ErrMode<ContextError>> {
    move |input: &mut &'i str| {
        alt((upper, lower)).void().parse_next(input)?;
        not(one_of(is_ident_char)).parse_next(input)
    }
}

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_ident_char),
    )
        .take()
        .parse_next(input)
}

// -- Terms and operators ----------------------------------------------------

fn term(input: &mut &str) -> ModalResult<RuleTerm> {
    filler.parse_next(input)?;
    let parameter = ident
        .context(StrContext::Expected(StrContextValue::Description(
            "parameter name",
        )))
        .parse_next(input)?;
    filler.parse_next(input)?;
    cut_err(keyword("IS", "is"))
        .context(StrContext::Expected(StrContextValue::StringLiteral("IS")))
        .parse_next(input)?;
    filler.parse_next(input)?;
    let fuzzy_set = cut_err(ident)
        .context(StrContext::Expected(StrContextValue::Description(
            "fuzzy set name",
        )))
        .parse_next(input)?;
    Ok(RuleTerm::new(parameter, fuzzy_set))
}

fn combinator(input: &mut &str) -> ModalResult<Combinator> {
    filler.parse_next(input)?;
    alt((
        keyword("AND", "and").value(Combinator::And),
        keyword("OR", "or").value(Combinator::Or),
    ))
    .parse_next(input)
}

// -- Rule lines -------------------------------------------------------------

/// Optional `RULE <label> :` prefix.
fn rule_label(input: &mut &str) -> ModalResult<String> {
    keyword("RULE", "rule").parse_next(input)?;
    take_while(1.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)?;
    let label = cut_err(take_while(1.., is_ident_char))
    .context(StrContext::Expected(StrContextValue::Description(
        "rule label",
    )))
    .parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(':').parse_next(input)?;
    Ok(label.to_owned())
}

pub fn rule_line(input: &mut &str) -> ModalResult<ParsedRule> {
    ws.parse_next(input)?;
    let label = opt(rule_label).parse_next(input)?;
    ws.parse_next(input)?;

    cut_err(keyword("IF", "if"))
        .context(StrContext::Expected(StrContextValue::StringLiteral("IF")))
        .parse_next(input)?;

    let first = cut_err(term).parse_next(input)?;
    let rest: Vec<(Combinator, RuleTerm)> =
        repeat(0.., (combinator, cut_err(term))).parse_next(input)?;

    filler.parse_next(input)?;
    cut_err(keyword("THEN", "then"))
        .context(StrContext::Expected(StrContextValue::StringLiteral("THEN")))
        .parse_next(input)?;

    let consequent = cut_err(term).parse_next(input)?;

    filler.parse_next(input)?;
    opt(';').parse_next(input)?;
    ws.parse_next(input)?;

    Ok(ParsedRule {
        label,
        first,
        rest,
        consequent,
    })
}
