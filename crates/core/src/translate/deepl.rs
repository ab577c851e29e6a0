use crate::config::{HudConfig, LanguageCode, LanguagePair, TranslationTimeoutConfig};
use crate::translate::{Translation, TranslationError, TranslationInput, Translator};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "alertkit::translate::deepl";

#[derive(Clone)]
pub struct DeepLTranslator {
    client: Client,
    api_key: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    fn endpoint(&self) -> &'static str {
        if self.api_key.ends_with(":fx") {
            "https://api-free.deepl.com/v2/translate"
        } else {
            "https://api.deepl.com/v2/translate"
        }
    }
}

#[derive(Serialize)]
struct DeepLRequest {
    text: Vec<String>,
    target_lang: String,
    source_lang: String,
}

#[derive(Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Deserialize)]
struct DeepLTranslation {
    text: String,
}

/// DeepL wants upper-case codes, with a few regional variants spelled out.
fn target_code(code: &LanguageCode) -> String {
    match code.as_str().to_lowercase().as_str() {
        "pt-br" => "PT-BR".to_owned(),
        "pt-pt" => "PT-PT".to_owned(),
        "en-gb" => "EN-GB".to_owned(),
        "en-us" => "EN-US".to_owned(),
        "en" => "EN-US".to_owned(),
        "pt" => "PT-PT".to_owned(),
        other => other.to_uppercase(),
    }
}

/// Source languages take no regional suffix.
fn source_code(code: &LanguageCode) -> String {
    code.primary_subtag().to_uppercase()
}

fn pair_outputs(
    inputs: Vec<TranslationInput>,
    outputs: Vec<DeepLTranslation>,
) -> Result<Vec<Translation>, TranslationError> {
    if inputs.len() != outputs.len() {
        return Err(TranslationError::InvalidResponse(format!(
            "expected {} translations, got {}",
            inputs.len(),
            outputs.len()
        )));
    }
    Ok(inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| Translation::new(input, output.text))
        .collect())
}

impl Translator for DeepLTranslator {
    fn get_translations(
        &self,
        inputs: Vec<TranslationInput>,
        language_pair: LanguagePair,
        _hud: Option<HudConfig>,
        _timeout: TranslationTimeoutConfig,
    ) -> BoxFuture<'_, Result<Vec<Translation>, TranslationError>> {
        async move {
            if inputs.is_empty() {
                return Ok(Vec::new());
            }

            let request = DeepLRequest {
                text: inputs.iter().map(|i| i.value().to_owned()).collect(),
                target_lang: target_code(&language_pair.target),
                source_lang: source_code(&language_pair.source),
            };

            tracing::debug!(
                target: LOG_TARGET,
                count = request.text.len(),
                source = %request.source_lang,
                target_lang = %request.target_lang,
                "requesting translations"
            );

            let response = self
                .client
                .post(self.endpoint())
                .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
                .json(&request)
                .send()
                .await
                .map_err(TranslationError::Network)?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_owned());
                return Err(TranslationError::Api(format!("HTTP {status}: {error_text}")));
            }

            let body: DeepLResponse = response.json().await.map_err(|e| {
                TranslationError::InvalidResponse(format!("Failed to parse JSON: {e}"))
            })?;

            pair_outputs(inputs, body.translations)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> LanguageCode {
        LanguageCode::new(s).unwrap()
    }

    #[test]
    fn target_codes_follow_deepl_spelling() {
        assert_eq!(target_code(&code("fr")), "FR");
        assert_eq!(target_code(&code("pt-br")), "PT-BR");
        assert_eq!(target_code(&code("en")), "EN-US");
    }

    #[test]
    fn source_codes_drop_region() {
        assert_eq!(source_code(&code("en-GB")), "EN");
    }

    #[test]
    fn free_tier_keys_use_free_endpoint() {
        assert!(DeepLTranslator::new("abc:fx".into()).endpoint().contains("api-free"));
        assert!(!DeepLTranslator::new("abc".into()).endpoint().contains("api-free"));
    }

    #[test]
    fn outputs_pair_with_inputs_by_position() {
        let inputs = vec![TranslationInput::new("Hello"), TranslationInput::new("Cancel")];
        let outputs = vec![
            DeepLTranslation { text: "Bonjour".into() },
            DeepLTranslation { text: "Annuler".into() },
        ];
        let paired = pair_outputs(inputs, outputs).unwrap();
        assert_eq!(paired[1].input.value(), "Cancel");
        assert_eq!(paired[1].output, "Annuler");
    }

    #[test]
    fn mismatched_output_count_is_rejected() {
        let inputs = vec![TranslationInput::new("Hello")];
        let err = pair_outputs(inputs, Vec::new()).unwrap_err();
        assert!(matches!(err, TranslationError::InvalidResponse(_)));
    }
}
