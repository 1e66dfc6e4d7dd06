//! Keyword rules
//!
//! A rule catalog is loaded once at startup and answers user input
//! deterministically, before anything is sent to the remote answer service.

mod catalog;
mod engine;
mod types;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // Public API re-exports
pub use catalog::{RuleSet, RuleSetError};
#[allow(unused_imports)] // Public API re-exports
pub use engine::{match_input, match_rule, RuleEngine};
#[allow(unused_imports)] // Public API re-exports
pub use types::{Action, Response, Rule};
