mod error;
mod grammar;
mod parser;

pub use error::ParseError;

use crate::Rule;

/// Parse a single rule line such as
/// `IF (age IS old) AND (cholesterol IS high) THEN health IS sick_3;`.
///
/// # Errors
///
/// Returns [`ParseError`] if the line is not valid rule syntax or mixes
/// `AND` and `OR`.
pub fn parse_rule(line: &str) -> Result<Rule, ParseError> {
    use winnow::Parser;
    grammar::rule_line
        .parse(line)
        .map_err(|e| ParseError::new(e.to_string()))?
        .into_rule()
}

/// Parse a rule file: one rule per line, blank lines and lines starting
/// with `#` skipped.
///
/// # Errors
///
/// Returns the first [`ParseError`], tagged with its 1-based line number.
pub fn parse_rules(text: &str) -> Result<Vec<Rule>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| parse_rule(line).map_err(|e| e.at_line(i + 1)))
        .collect()
}
