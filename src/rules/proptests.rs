//! Property-based tests for rule dispatch
//!
//! - Matching ignores the casing of both keyword and input
//! - The earliest matching rule always wins
//! - Input sharing no keyword never matches

use super::catalog::RuleSet;
use super::engine::{match_input, match_rule};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Strategies
// ============================================================================

fn arb_keyword() -> impl Strategy<Value = String> {
    "[a-z]{3,10}"
}

/// Filler text drawn from an alphabet disjoint from keywords
fn arb_filler() -> impl Strategy<Value = String> {
    "[0-9 .,!?]{0,20}"
}

/// Randomly flip the case of each character
fn arb_recase(word: String) -> impl Strategy<Value = String> {
    let len = word.chars().count();
    prop::collection::vec(any::<bool>(), len).prop_map(move |flips| {
        word.chars()
            .zip(flips)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn catalog(rules: &[(Vec<String>, String)]) -> RuleSet {
    let rules: Vec<_> = rules
        .iter()
        .map(|(keywords, text)| json!({ "keywords": keywords, "responses": [{ "text": text }, { "text": "second" }] }))
        .collect();
    RuleSet::from_json(&json!({ "rules": rules }).to_string()).unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_case_insensitive_match(
        (keyword, recased) in arb_keyword().prop_flat_map(|k| (Just(k.clone()), arb_recase(k))),
        keyword_upper in any::<bool>(),
        prefix in arb_filler(),
        suffix in arb_filler(),
    ) {
        let configured = if keyword_upper { keyword.to_uppercase() } else { keyword.clone() };
        let rules = catalog(&[(vec![configured], "answer".to_string())]);
        let input = format!("{prefix}{recased}{suffix}");

        let response = match_input(&input, &rules);
        prop_assert_eq!(response.map(|r| r.text.as_str()), Some("answer"));
    }

    #[test]
    fn prop_earliest_rule_wins(
        keywords in prop::collection::vec(arb_keyword(), 2..6),
        pick in any::<prop::sample::Index>(),
        filler in arb_filler(),
    ) {
        let rules: Vec<(Vec<String>, String)> = keywords
            .iter()
            .enumerate()
            .map(|(i, k)| (vec![k.clone()], format!("rule-{i}")))
            .collect();
        let ruleset = catalog(&rules);

        let target = pick.index(keywords.len());
        let input = format!("{filler}{}", keywords[target]);

        // Whatever matched must be the lowest-index rule whose keyword occurs in input
        let expected = keywords
            .iter()
            .position(|k| input.contains(k.as_str()))
            .unwrap();
        let (index, _) = match_rule(&input, &ruleset).unwrap();
        prop_assert_eq!(index, expected);
        prop_assert!(index <= target);
        let expected_text = format!("rule-{expected}");
        prop_assert_eq!(
            match_input(&input, &ruleset).map(|r| r.text.clone()),
            Some(expected_text)
        );
    }

    #[test]
    fn prop_disjoint_input_never_matches(
        keywords in prop::collection::vec(arb_keyword(), 1..5),
        input in arb_filler(),
    ) {
        let ruleset = catalog(&[(keywords, "answer".to_string())]);
        prop_assert!(match_input(&input, &ruleset).is_none());
    }
}
