//! Rule catalog types

use serde::{Deserialize, Serialize};

/// A button attached to a canned response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub label: String,
    /// Opaque command name interpreted by the UI
    pub action: String,
}

/// Canned reply. `text` may contain markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Action>,
}

impl Response {
    #[allow(dead_code)] // Used when building catalogs in code
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }
}

/// Why a configured rule was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RuleDefect {
    NoKeywords,
    BlankKeyword,
    NoResponses,
}

/// A validated rule: non-empty keywords mapped to non-empty responses.
///
/// Keywords are stored lowercased and deduplicated, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    keywords: Vec<String>,
    responses: Vec<Response>,
}

impl Rule {
    pub(super) fn new(keywords: &[String], responses: Vec<Response>) -> Result<Self, RuleDefect> {
        if keywords.is_empty() {
            return Err(RuleDefect::NoKeywords);
        }
        if responses.is_empty() {
            return Err(RuleDefect::NoResponses);
        }

        let mut normalized: Vec<String> = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            if keyword.trim().is_empty() {
                return Err(RuleDefect::BlankKeyword);
            }
            let lowered = keyword.to_lowercase();
            if !normalized.contains(&lowered) {
                normalized.push(lowered);
            }
        }

        Ok(Self {
            keywords: normalized,
            responses,
        })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[allow(dead_code)] // API completeness
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// First configured response. Later responses are kept in the model but
    /// never chosen by dispatch.
    pub fn primary_response(&self) -> &Response {
        // Non-empty by construction
        &self.responses[0]
    }

    /// Whether any keyword occurs in already-lowercased input
    pub(super) fn matches_lowered(&self, lowered_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered_input.contains(keyword.as_str()))
    }
}
