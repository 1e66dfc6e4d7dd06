//! Rule dispatch
//!
//! Pure keyword matching: the first rule (in catalog order) with any keyword
//! occurring case-insensitively in the input wins, and its first response is
//! the answer. No scoring, no longest-match.

use super::catalog::RuleSet;
use super::types::{Response, Rule};
use std::sync::Arc;

/// Find the first matching rule and its position in the catalog
pub fn match_rule<'a>(input: &str, ruleset: &'a RuleSet) -> Option<(usize, &'a Rule)> {
    let lowered = input.to_lowercase();
    ruleset
        .rules()
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches_lowered(&lowered))
}

/// Canned response for `input`, or `None` when the remote service must answer
#[allow(dead_code)] // API completeness; the controller goes through RuleEngine
pub fn match_input<'a>(input: &str, ruleset: &'a RuleSet) -> Option<&'a Response> {
    match_rule(input, ruleset).map(|(_, rule)| rule.primary_response())
}

/// Shared handle over a loaded catalog
#[derive(Debug, Clone)]
pub struct RuleEngine {
    ruleset: Arc<RuleSet>,
}

impl RuleEngine {
    pub fn new(ruleset: Arc<RuleSet>) -> Self {
        Self { ruleset }
    }

    pub fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    /// Match `input`, logging which rule answered
    pub fn respond(&self, input: &str) -> Option<&Response> {
        let (index, rule) = match_rule(input, &self.ruleset)?;
        tracing::debug!(rule = index, "Input answered by rule");
        Some(rule.primary_response())
    }
}
