// src/privacy.rs
//! Decides whether a resident's words are a private call/message request
//! (never stored) or a maintenance complaint (stored as a ticket).

use crate::classifier::{classify_with, Classifier};
use crate::domain::ClassificationResult;
use std::fmt;
use std::str::FromStr;

/// Substrings that mark an input as a private call/message request.
pub const PRIVATE_KEYWORDS: &[&str] = &[
    "call", "phone", "message", "contact", "connect", "ring", "talk to",
];

pub const DEFAULT_TARGET: &str = "Security";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyMode {
    /// Trigger words decide privacy; the model only categorises complaints.
    Keyword,
    /// Trigger words still win; everything else gets the model's full
    /// intent classification.
    Model,
}

impl FromStr for ClassifyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keyword" => Ok(ClassifyMode::Keyword),
            "model" => Ok(ClassifyMode::Model),
            other => Err(format!("expected \"keyword\" or \"model\", got {other:?}")),
        }
    }
}

impl fmt::Display for ClassifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyMode::Keyword => f.write_str("keyword"),
            ClassifyMode::Model => f.write_str("model"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PrivacyFilter {
    mode: ClassifyMode,
}

impl PrivacyFilter {
    pub fn new(mode: ClassifyMode) -> Self {
        Self { mode }
    }

    /// Classify one input. Never fails: a classifier error yields the
    /// General complaint fallback.
    pub fn classify(&self, classifier: &dyn Classifier, text: &str) -> ClassificationResult {
        if let Some(private) = keyword_private(text) {
            return private;
        }

        let prompt = match self.mode {
            ClassifyMode::Keyword => complaint_prompt(text),
            ClassifyMode::Model => intent_prompt(text),
        };

        match classify_with(classifier, &prompt, text) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, mode = %self.mode, "classification failed, filing as General complaint");
                ClassificationResult::fallback(text)
            }
        }
    }
}

/// The keyword short-circuit. Returns `Some` for private requests.
pub fn keyword_private(text: &str) -> Option<ClassificationResult> {
    let lower = text.to_lowercase();
    if !PRIVATE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return None;
    }

    let action = if lower.contains("mess") { "message" } else { "call" };
    Some(ClassificationResult::private(text, action, extract_target(text)))
}

/// Every digit in the text (any script), in order, or the security desk.
pub fn extract_target(text: &str) -> String {
    let digits: String = text.chars().filter(|c| c.is_numeric()).collect();
    if digits.is_empty() {
        DEFAULT_TARGET.to_string()
    } else {
        digits
    }
}

fn complaint_prompt(text: &str) -> String {
    format!(
        r#"Analyze this complaint: "{text}"
Output valid JSON: {{"intent": "complaint", "category": "Maintenance", "text": "Issue: {text}"}}
Categories: Plumbing, Electrical, Security, Cleaning, Maintenance.
Rewrite "text" as a short, polite English description of the issue."#
    )
}

fn intent_prompt(text: &str) -> String {
    format!(
        r#"You route messages from residents of an apartment community.
Message: "{text}"

Rules:
- If the resident wants to call, phone, message, contact, connect to, ring or talk to
  someone (a flat number, a neighbour, the security desk), the intent is "private".
  Set "action" to "call" or "message" and "target" to the flat number or person.
- If the resident reports a problem (something broken, water, leaks, the lift,
  power, danger, dirt, noise), the intent is "complaint". Pick "category" from
  Plumbing, Electrical, Security, Cleaning, Maintenance, General and set
  "action" and "target" to "none".
- "text" is a short, polite English version of the message.

Output ONLY valid JSON of the form:
{{"intent": "complaint", "category": "Plumbing", "text": "...", "action": "none", "target": "none"}}"#
    )
}
