//! Rule catalog loading and validation
//!
//! The catalog is a JSON document:
//!
//! ```json
//! { "rules": [ { "keywords": ["hello"], "responses": [ { "text": "Hi!", "buttons": [] } ] } ] }
//! ```

use super::types::{Response, Rule, RuleDefect};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a rule catalog
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("Failed to read rule catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse rule catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Rule catalog contains no rules")]
    Empty,
    #[error("Rule {index} has no keywords")]
    NoKeywords { index: usize },
    #[error("Rule {index} has a blank keyword")]
    BlankKeyword { index: usize },
    #[error("Rule {index} has no responses")]
    NoResponses { index: usize },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    responses: Vec<Response>,
}

/// Ordered, immutable rule catalog
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Load and validate a catalog from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ruleset = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), rules = ruleset.len(), "Loaded rule catalog");
        Ok(ruleset)
    }

    /// Parse and validate a catalog document
    pub fn from_json(raw: &str) -> Result<Self, RuleSetError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::from_raw(file.rules)
    }

    fn from_raw(raw_rules: Vec<RawRule>) -> Result<Self, RuleSetError> {
        if raw_rules.is_empty() {
            return Err(RuleSetError::Empty);
        }

        let rules = raw_rules
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Rule::new(&raw.keywords, raw.responses).map_err(|defect| match defect {
                    RuleDefect::NoKeywords => RuleSetError::NoKeywords { index },
                    RuleDefect::BlankKeyword => RuleSetError::BlankKeyword { index },
                    RuleDefect::NoResponses => RuleSetError::NoResponses { index },
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Message every new conversation opens with: the first response of the
    /// first rule.
    pub fn greeting(&self) -> &Response {
        // A loaded catalog always has at least one rule
        self.rules[0].primary_response()
    }
}
