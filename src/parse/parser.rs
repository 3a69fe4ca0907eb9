use crate::{Combinator, Rule, RuleTerm};

use super::ParseError;

/// One rule line as the grammar sees it, before combinators are checked.
#[derive(Debug)]
pub struct ParsedRule {
    pub label: Option<String>,
    pub first: RuleTerm,
    pub rest: Vec<(Combinator, RuleTerm)>,
    pub consequent: RuleTerm,
}

impl ParsedRule {
    /// Convert into a [`Rule`], rejecting lines that mix `AND` and `OR`.
    pub(crate) fn into_rule(self) -> Result<Rule, ParseError> {
        let combinator = self.rest.first().map(|(c, _)| *c);
        if self.rest.iter().any(|(c, _)| Some(*c) != combinator) {
            return Err(ParseError::new(
                "AND and OR cannot be mixed in one rule",
            ));
        }
        let mut antecedents = Vec::with_capacity(self.rest.len() + 1);
        antecedents.push(self.first);
        antecedents.extend(self.rest.into_iter().map(|(_, term)| term));

        let rule = Rule::new(antecedents, combinator, self.consequent)
            .map_err(|e| ParseError::new(e.to_string()))?;
        Ok(match self.label {
            Some(label) => rule.with_label(&label),
            None => rule,
        })
    }
}
