// src/domain/classification.rs
use serde::{Deserialize, Deserializer, Serialize};

pub const FALLBACK_CATEGORY: &str = "General";
pub const PRIVATE_CATEGORY: &str = "Private";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    #[serde(alias = "Complaint")]
    Complaint,
    #[serde(alias = "Private")]
    Private,
}

/// What the privacy filter decided about one resident input.
///
/// `action` and `target` are only meaningful for private intents; the
/// classifier may send `"none"` for them on complaints, which is read as
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: Intent,
    #[serde(default = "fallback_category")]
    pub category: String,
    #[serde(default)]
    pub text: String,
    #[serde(
        default,
        deserialize_with = "none_as_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<String>,
    #[serde(
        default,
        deserialize_with = "none_as_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<String>,
}

impl ClassificationResult {
    /// The result used whenever classification fails: a General complaint
    /// carrying the raw input, so nothing is dropped.
    pub fn fallback(raw: &str) -> Self {
        Self {
            intent: Intent::Complaint,
            category: FALLBACK_CATEGORY.to_string(),
            text: raw.to_string(),
            action: None,
            target: None,
        }
    }

    pub fn private(raw: &str, action: &str, target: String) -> Self {
        Self {
            intent: Intent::Private,
            category: PRIVATE_CATEGORY.to_string(),
            text: raw.to_string(),
            action: Some(action.to_string()),
            target: Some(target),
        }
    }

    pub fn is_private(&self) -> bool {
        self.intent == Intent::Private
    }

    /// Fill gaps the classifier left: empty text falls back to the raw
    /// input and an empty category to "General".
    pub fn normalized(mut self, raw: &str) -> Self {
        if self.text.trim().is_empty() {
            self.text = raw.to_string();
        }
        if self.category.trim().is_empty() {
            self.category = FALLBACK_CATEGORY.to_string();
        }
        self
    }
}

fn fallback_category() -> String {
    FALLBACK_CATEGORY.to_string()
}

fn none_as_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // Models sometimes send flat numbers as JSON numbers.
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let text = match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => return Ok(None),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
