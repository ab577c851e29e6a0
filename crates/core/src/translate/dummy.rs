use crate::config::{HudConfig, LanguagePair, TranslationTimeoutConfig};
use crate::translate::{Translation, TranslationError, TranslationInput, Translator};
use futures::future::BoxFuture;
use futures::FutureExt;

/// Returns every input unchanged. Useful when the source and target language
/// agree, or as a stand-in backend.
#[derive(Clone)]
pub struct IdentityTranslator;

impl IdentityTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdentityTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for IdentityTranslator {
    fn get_translations(
        &self,
        inputs: Vec<TranslationInput>,
        _language_pair: LanguagePair,
        _hud: Option<HudConfig>,
        _timeout: TranslationTimeoutConfig,
    ) -> BoxFuture<'_, Result<Vec<Translation>, TranslationError>> {
        async move { Ok(inputs.into_iter().map(Translation::unchanged).collect()) }.boxed()
    }
}
