//! The translate-then-present protocol shared by every prompt kind.
//!
//! `present` with a non-empty key list makes exactly one translation round
//! trip, then presents the translated copy (or, on failure, the original)
//! with an empty key list, which is terminal. The five prompt kinds only
//! supply field extraction, reconstruction from translations, and the native
//! descriptor.

mod action_sheet;
mod alert;
mod confirmation;
mod error_alert;
mod text_input;

#[cfg(test)]
mod test_support;

use crate::action::DEFAULT_ACTION_TITLE;
use crate::config::AlertConfig;
use crate::native::{self, AlertResponse, NativeAlert};
use crate::text::{AttributeOverlay, AttributedStringConfig};
use crate::translate::{Translation, TranslationInput};
use crate::util::unique;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::borrow::Cow;
use std::fmt;

pub use action_sheet::{ActionSheet, ActionSheetKey, CustomSourceItem, SourceItem};
pub use alert::{Alert, AlertKey};
pub use confirmation::{ConfirmationAlert, ConfirmationKey};
pub use error_alert::{ErrorAlert, ErrorAlertKey, ErrorRecord, Errorable, SimpleError};
pub use text_input::{TextInputAlert, TextInputKey};

const LOG_TARGET: &str = "alertkit::prompt";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    #[error("translation failed: {0}")]
    TranslationFailed(String),
}

pub trait Presentable: Clone + Send + Sync + 'static {
    /// Names one translatable field of the prompt.
    type Key: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;
    /// What the user's choice resolves to.
    type Response: Send + 'static;

    /// Keys translated by [`Presentable::present`].
    fn default_keys() -> Vec<Self::Key>;

    /// Source strings backing `key`; empty when the field is unset.
    fn source_texts(&self, key: &Self::Key) -> Vec<String>;

    /// A new prompt whose text fields are looked up in `translations`. `keys`
    /// only narrows which actions are retitled.
    fn rebuilt(&self, keys: &[Self::Key], translations: &[Translation]) -> Self;

    /// Shows the prompt as is and waits for the user.
    fn present_native<'a>(&'a self, config: &'a AlertConfig) -> BoxFuture<'a, Self::Response>;

    fn present<'a>(&'a self, config: &'a AlertConfig) -> BoxFuture<'a, Self::Response> {
        self.present_translating(config, Self::default_keys())
    }

    fn present_translating<'a>(
        &'a self,
        config: &'a AlertConfig,
        keys: Vec<Self::Key>,
    ) -> BoxFuture<'a, Self::Response> {
        present_translating(self, config, keys).boxed()
    }

    /// The translated copy; the result borrows only `self` and `config`.
    fn translate<'a>(
        &'a self,
        config: &'a AlertConfig,
        keys: &[Self::Key],
    ) -> BoxFuture<'a, Result<Cow<'a, Self>, AlertError>> {
        let keys = keys.to_vec();
        async move { translate(self, config, &keys).await }.boxed()
    }

    fn enable_action(&self, config: &AlertConfig, index: usize) {
        native::enable_action(config, index);
    }

    fn disable_action(&self, config: &AlertConfig, index: usize) {
        native::disable_action(config, index);
    }
}

/// The deduplicated batch submitted for `keys`, never containing the default
/// action title.
pub fn translation_inputs<P: Presentable>(prompt: &P, keys: &[P::Key]) -> Vec<TranslationInput> {
    unique(keys.iter().flat_map(|key| prompt.source_texts(key)))
        .into_iter()
        .filter(|text| text != DEFAULT_ACTION_TITLE)
        .map(TranslationInput::new)
        .collect()
}

pub async fn translate<'a, P: Presentable>(
    prompt: &'a P,
    config: &AlertConfig,
    keys: &[P::Key],
) -> Result<Cow<'a, P>, AlertError> {
    let keys = unique(keys.iter().cloned());
    if keys.is_empty() {
        return Ok(Cow::Borrowed(prompt));
    }

    let Some(translator) = config.translator() else {
        tracing::debug!(target: LOG_TARGET, "no translator registered, keeping source text");
        return Ok(Cow::Borrowed(prompt));
    };

    let inputs = translation_inputs(prompt, &keys);
    if inputs.is_empty() {
        return Ok(Cow::Borrowed(prompt));
    }

    tracing::debug!(
        target: LOG_TARGET,
        inputs = inputs.len(),
        source = %config.language_pair().source,
        target_lang = %config.language_pair().target,
        "translating prompt"
    );

    match translator
        .get_translations(
            inputs,
            config.language_pair().clone(),
            config.hud(),
            config.timeout(),
        )
        .await
    {
        Ok(translations) => Ok(Cow::Owned(prompt.rebuilt(&keys, &translations))),
        Err(e) => Err(AlertError::TranslationFailed(e.to_string())),
    }
}

pub async fn present_translating<P: Presentable>(
    prompt: &P,
    config: &AlertConfig,
    keys: Vec<P::Key>,
) -> P::Response {
    if keys.is_empty() {
        return prompt.present_native(config).await;
    }

    match translate(prompt, config, &keys).await {
        Ok(translated) => translated.present_translating(config, Vec::new()).await,
        Err(error) => {
            tracing::warn!(target: LOG_TARGET, error = %error, "presenting untranslated prompt");
            if let Some(logger) = config.logger() {
                logger.log(&error.to_string(), crate::callsite!());
            }
            prompt.present_translating(config, Vec::new()).await
        }
    }
}

/// Hands `alert` to the presenter. `None` when there is no presenter or the
/// presentation failed; both are logged.
pub(crate) async fn show(config: &AlertConfig, alert: NativeAlert) -> Option<AlertResponse> {
    let Some(presenter) = config.presenter() else {
        tracing::warn!(target: LOG_TARGET, "no presentation delegate registered");
        return None;
    };

    match presenter.present(alert).await {
        Ok(response) => Some(response),
        Err(error) => {
            tracing::debug!(target: LOG_TARGET, error = %error, "alert closed without a choice");
            if let Some(logger) = config.logger() {
                logger.log(&error.to_string(), crate::callsite!());
            }
            None
        }
    }
}

/// Title and message overlays of a prompt.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Overlays {
    pub(crate) message: Option<AttributeOverlay>,
    pub(crate) title: Option<AttributeOverlay>,
}

impl Overlays {
    pub(crate) fn set_message(&mut self, config: AttributedStringConfig) {
        self.message = Some(AttributeOverlay::new(config));
    }

    pub(crate) fn set_title(&mut self, config: AttributedStringConfig) {
        self.title = Some(AttributeOverlay::new(config));
    }

    /// Copies the overlays for a translated prompt, pinned to the source text
    /// they were written for.
    pub(crate) fn anchored(&self, message: Option<&str>, title: Option<&str>) -> Self {
        fn pin(overlay: &Option<AttributeOverlay>, source: Option<&str>) -> Option<AttributeOverlay> {
            match (overlay, source) {
                (Some(o), Some(s)) => Some(o.anchored_to(s)),
                (o, _) => o.clone(),
            }
        }
        Self {
            message: pin(&self.message, message),
            title: pin(&self.title, title),
        }
    }

    /// Renders the overlays onto whatever title and message `alert` displays.
    pub(crate) fn apply(&self, alert: &mut NativeAlert) {
        if let (Some(overlay), Some(message)) = (&self.message, &alert.message) {
            alert.attributed_message = Some(overlay.render(message));
        }
        if let (Some(overlay), Some(title)) = (&self.title, &alert.title) {
            alert.attributed_title = Some(overlay.render(title));
        }
    }
}
