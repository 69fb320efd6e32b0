//! Gateway to the external generative model that transcribes audio and
//! classifies resident input.

mod classifier_error;
mod gemini;

pub use classifier_error::ClassifierError;
pub use gemini::GeminiClient;

use crate::domain::ClassificationResult;
use std::path::Path;

pub const TRANSCRIBE_PROMPT: &str =
    "Transcribe this audio exactly into English text. Output ONLY the text.";

/// An audio clip already written to local disk.
#[derive(Debug, Clone, Copy)]
pub struct AudioClip<'a> {
    pub path: &'a Path,
    pub mime_type: &'a str,
}

/// A text-generation model. Implementations return the raw reply text;
/// clean-up and parsing happen in this module.
pub trait Classifier: Send + Sync {
    /// Submit a single prompt string.
    fn generate(&self, prompt: &str) -> Result<String, ClassifierError>;

    /// Register the audio with the provider, then submit it together with
    /// the instruction prompt.
    fn generate_with_audio(
        &self,
        audio: AudioClip<'_>,
        prompt: &str,
    ) -> Result<String, ClassifierError>;

    fn model_name(&self) -> &str;
}

/// Remove Markdown code fences and surrounding whitespace from a reply.
pub fn clean_reply(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a cleaned reply as a classification. Gaps are filled from `raw_input`.
pub fn parse_classification(
    reply: &str,
    raw_input: &str,
) -> Result<ClassificationResult, ClassifierError> {
    let cleaned = clean_reply(reply);
    let parsed: ClassificationResult = serde_json::from_str(&cleaned)
        .map_err(|e| ClassifierError::JsonParse(format!("{e} in reply {cleaned:?}")))?;
    Ok(parsed.normalized(raw_input))
}

/// Ask the model for a JSON classification of `raw_input` using `prompt`.
pub fn classify_with(
    classifier: &dyn Classifier,
    prompt: &str,
    raw_input: &str,
) -> Result<ClassificationResult, ClassifierError> {
    let reply = classifier.generate(prompt)?;
    parse_classification(&reply, raw_input)
}

/// Plain-text English transcription of an audio clip.
pub fn transcribe(
    classifier: &dyn Classifier,
    audio: AudioClip<'_>,
) -> Result<String, ClassifierError> {
    let reply = classifier.generate_with_audio(audio, TRANSCRIBE_PROMPT)?;
    let text = clean_reply(&reply);
    if text.is_empty() {
        return Err(ClassifierError::EmptyResponse);
    }
    Ok(text)
}
