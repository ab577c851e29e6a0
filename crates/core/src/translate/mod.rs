mod deepl;
mod dummy;
mod timeout;

use crate::config::{HudConfig, LanguagePair, TranslationTimeoutConfig};
use crate::text::sanitized;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use deepl::DeepLTranslator;
pub use dummy::IdentityTranslator;
pub use timeout::{HudIndicator, TimeoutTranslator};

/// A unit of text submitted for translation. Inputs compare by value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TranslationInput {
    value: String,
}

impl TranslationInput {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translation {
    pub input: TranslationInput,
    pub output: String,
}

impl Translation {
    pub fn new<S: Into<String>>(input: TranslationInput, output: S) -> Self {
        Self {
            input,
            output: output.into(),
        }
    }

    /// A translation whose output is its own input.
    pub fn unchanged(input: TranslationInput) -> Self {
        let output = input.value.clone();
        Self { input, output }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TranslationError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("api error: {0}")]
    Api(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("translation timed out after {0:?}")]
    TimedOut(Duration),

    #[error("translation unavailable: {0}")]
    Unavailable(String),
}

/// The injected translation capability.
///
/// Implementations receive one deduplicated batch per call. Enforcing
/// `timeout` and showing the busy indicator described by `hud` is the
/// implementation's job; see [`TimeoutTranslator`].
pub trait Translator: Send + Sync {
    fn get_translations(
        &self,
        inputs: Vec<TranslationInput>,
        language_pair: LanguagePair,
        hud: Option<HudConfig>,
        timeout: TranslationTimeoutConfig,
    ) -> BoxFuture<'_, Result<Vec<Translation>, TranslationError>>;
}

/// The sanitized output of the first translation of `input`, or the sanitized
/// `input` itself when no translation matches.
pub fn first_output(translations: &[Translation], input: &str) -> String {
    let output = translations
        .iter()
        .find(|t| t.input.value == input)
        .map(|t| t.output.as_str())
        .unwrap_or(input);
    sanitized(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_output_uses_first_match() {
        let translations = vec![
            Translation::new(TranslationInput::new("Hello"), "Bonjour"),
            Translation::new(TranslationInput::new("Hello"), "Salut"),
        ];
        assert_eq!(first_output(&translations, "Hello"), "Bonjour");
    }

    #[test]
    fn first_output_falls_back_to_input() {
        let translations = vec![Translation::new(TranslationInput::new("Hello"), "Bonjour")];
        assert_eq!(first_output(&translations, "Goodbye"), "Goodbye");
    }

    #[test]
    fn first_output_sanitizes_both_paths() {
        let translations = vec![Translation::new(TranslationInput::new("⌘Hi"), "Salut⁂")];
        assert_eq!(first_output(&translations, "⌘Hi"), "Salut");
        assert_eq!(first_output(&translations, "⁂Bye"), "Bye");
    }

    #[test]
    fn inputs_compare_by_value() {
        assert_eq!(TranslationInput::new("a"), TranslationInput::new(String::from("a")));
        assert_ne!(TranslationInput::new("a"), TranslationInput::new("b"));
    }
}
