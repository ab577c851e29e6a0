use crate::action::ActionStyle;
use crate::config::{AlertConfig, DEFAULT_CANCEL_BUTTON_TITLE, DEFAULT_CONFIRM_BUTTON_TITLE};
use crate::native::{NativeAlert, PresentationStyle, TextChangeCallback, TextFieldObserver};
use crate::prompt::{show, Overlays, Presentable};
use crate::text::AttributedStringConfig;
use crate::text_field::TextFieldAttributes;
use crate::translate::{first_output, Translation};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextInputKey {
    CancelButtonTitle,
    ConfirmButtonTitle,
    Message,
    PlaceholderText,
    SampleText,
    Title,
}

/// An alert with a single text field. Presenting it resolves to the entered
/// text on confirm and `None` on cancel.
#[derive(Clone)]
pub struct TextInputAlert {
    title: Option<String>,
    message: String,
    attributes: TextFieldAttributes,
    cancel_button_title: String,
    cancel_button_style: ActionStyle,
    confirm_button_title: String,
    confirm_button_style: ActionStyle,
    on_text_field_change: Option<TextChangeCallback>,
    overlays: Overlays,
}

impl TextInputAlert {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            title: None,
            message: message.into(),
            attributes: TextFieldAttributes::default(),
            cancel_button_title: DEFAULT_CANCEL_BUTTON_TITLE.to_owned(),
            cancel_button_style: ActionStyle::Cancel,
            confirm_button_title: DEFAULT_CONFIRM_BUTTON_TITLE.to_owned(),
            confirm_button_style: ActionStyle::Preferred,
            on_text_field_change: None,
            overlays: Overlays::default(),
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_attributes(mut self, attributes: TextFieldAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_cancel_button<S: Into<String>>(mut self, title: S, style: ActionStyle) -> Self {
        self.cancel_button_title = title.into();
        self.cancel_button_style = style;
        self
    }

    pub fn with_confirm_button<S: Into<String>>(mut self, title: S, style: ActionStyle) -> Self {
        self.confirm_button_title = title.into();
        self.confirm_button_style = style;
        self
    }

    /// Runs `callback` with the field's contents on every edit while the alert
    /// is on screen.
    pub fn on_text_field_change<F>(&mut self, callback: F)
    where
        F: Fn(Option<&str>) + Send + Sync + 'static,
    {
        self.on_text_field_change = Some(Arc::new(callback));
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn attributes(&self) -> &TextFieldAttributes {
        &self.attributes
    }

    pub fn cancel_button_title(&self) -> &str {
        &self.cancel_button_title
    }

    pub fn confirm_button_title(&self) -> &str {
        &self.confirm_button_title
    }

    pub fn set_message_attributes(&mut self, config: AttributedStringConfig) {
        self.overlays.set_message(config);
    }

    pub fn set_title_attributes(&mut self, config: AttributedStringConfig) {
        self.overlays.set_title(config);
    }
}

impl fmt::Debug for TextInputAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInputAlert")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("attributes", &self.attributes)
            .field("cancel_button_title", &self.cancel_button_title)
            .field("confirm_button_title", &self.confirm_button_title)
            .field("observes_changes", &self.on_text_field_change.is_some())
            .finish_non_exhaustive()
    }
}

impl Presentable for TextInputAlert {
    type Key = TextInputKey;
    type Response = Option<String>;

    fn default_keys() -> Vec<TextInputKey> {
        vec![
            TextInputKey::CancelButtonTitle,
            TextInputKey::ConfirmButtonTitle,
            TextInputKey::Message,
            TextInputKey::PlaceholderText,
            TextInputKey::SampleText,
            TextInputKey::Title,
        ]
    }

    fn source_texts(&self, key: &TextInputKey) -> Vec<String> {
        match key {
            TextInputKey::CancelButtonTitle => vec![self.cancel_button_title.clone()],
            TextInputKey::ConfirmButtonTitle => vec![self.confirm_button_title.clone()],
            TextInputKey::Message => vec![self.message.clone()],
            TextInputKey::PlaceholderText => self.attributes.placeholder_text.iter().cloned().collect(),
            TextInputKey::SampleText => self.attributes.sample_text.iter().cloned().collect(),
            TextInputKey::Title => self.title.iter().cloned().collect(),
        }
    }

    fn rebuilt(&self, _keys: &[TextInputKey], translations: &[Translation]) -> Self {
        let field = |text: &str| first_output(translations, text);

        let attributes = TextFieldAttributes {
            placeholder_text: self.attributes.placeholder_text.as_deref().map(field),
            sample_text: self.attributes.sample_text.as_deref().map(field),
            ..self.attributes.clone()
        };

        Self {
            title: self.title.as_deref().map(field),
            message: field(&self.message),
            attributes,
            cancel_button_title: field(&self.cancel_button_title),
            cancel_button_style: self.cancel_button_style,
            confirm_button_title: field(&self.confirm_button_title),
            confirm_button_style: self.confirm_button_style,
            on_text_field_change: self.on_text_field_change.clone(),
            overlays: self
                .overlays
                .anchored(Some(&self.message), self.title.as_deref()),
        }
    }

    fn present_native<'a>(&'a self, config: &'a AlertConfig) -> BoxFuture<'a, Option<String>> {
        async move {
            let mut native = NativeAlert::new(
                PresentationStyle::Alert,
                self.title.as_deref(),
                Some(&self.message),
            );
            native.text_field = Some(self.attributes.sanitized());
            let (_, confirm) = native.push_button_pair(
                (&self.cancel_button_title, self.cancel_button_style),
                (&self.confirm_button_title, self.confirm_button_style),
            );
            self.overlays.apply(&mut native);

            // Held until the alert is answered; dropping it ends observation.
            let _subscription = self.on_text_field_change.clone().map(|callback| {
                let (observer, subscription) = TextFieldObserver::subscribe(callback);
                native.text_observer = Some(observer);
                subscription
            });

            let response = show(config, native).await?;
            (response.action_index == confirm).then(|| response.text.unwrap_or_default())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::AlertResponse;
    use crate::prompt::test_support::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn confirm_returns_entered_text() {
        let presenter =
            ScriptedPresenter::new(vec![Ok(AlertResponse::action(1).with_text("Ada"))]);
        let config = config_with(RecordingTranslator::new(&[]), presenter.clone());

        let name = TextInputAlert::new("Name?").present(&config).await;
        assert_eq!(name.as_deref(), Some("Ada"));

        let shown = &presenter.presented()[0];
        assert_eq!(shown.text_field, Some(TextFieldAttributes::default()));
        assert_eq!(shown.preferred_action, Some(1));
    }

    #[tokio::test]
    async fn confirm_with_untouched_field_returns_empty_text() {
        let presenter = ScriptedPresenter::new(vec![Ok(AlertResponse::action(1))]);
        let config = config_with(RecordingTranslator::new(&[]), presenter);

        let name = TextInputAlert::new("Name?").present(&config).await;
        assert_eq!(name.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn cancel_returns_none() {
        let presenter =
            ScriptedPresenter::new(vec![Ok(AlertResponse::action(0).with_text("Ada"))]);
        let config = config_with(RecordingTranslator::new(&[]), presenter);
        assert_eq!(TextInputAlert::new("Name?").present(&config).await, None);
    }

    #[tokio::test]
    async fn placeholder_and_sample_text_are_translated() {
        let translator = RecordingTranslator::new(&[
            ("Name?", "Nom ?"),
            ("Your name", "Votre nom"),
            ("Jane", "Jeanne"),
        ]);
        let presenter = ScriptedPresenter::new(vec![Ok(AlertResponse::action(0))]);
        let config = config_with(translator.clone(), presenter.clone());

        let attributes = TextFieldAttributes::default()
            .replacing_placeholder_text("⌘Your name")
            .replacing_sample_text("Jane");
        TextInputAlert::new("Name?")
            .with_attributes(attributes)
            .present(&config)
            .await;

        let batch = &translator.batches()[0];
        assert_eq!(
            batch,
            &vec![
                "Cancel".to_owned(),
                "Confirm".to_owned(),
                "Name?".to_owned(),
                "⌘Your name".to_owned(),
                "Jane".to_owned(),
            ]
        );
        let field = presenter.presented()[0].text_field.clone().unwrap();
        assert_eq!(field.sample_text.as_deref(), Some("Jeanne"));
        // The marked placeholder had no exact match, so the source is shown
        // without its marker.
        assert_eq!(field.placeholder_text.as_deref(), Some("Your name"));
        assert_eq!(presenter.presented()[0].message.as_deref(), Some("Nom ?"));
    }

    #[tokio::test]
    async fn observer_fires_during_presentation_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let presenter = ScriptedPresenter::with_hook(
            vec![Ok(AlertResponse::action(1).with_text("Ada"))],
            |alert| {
                if let Some(observer) = &alert.text_observer {
                    observer.text_did_change(Some("A"));
                    observer.text_did_change(Some("Ad"));
                }
            },
        );
        let config = config_with(RecordingTranslator::new(&[]), presenter.clone());

        let mut prompt = TextInputAlert::new("Name?");
        prompt.on_text_field_change(move |text| {
            sink.lock().unwrap().push(text.unwrap_or_default().to_owned());
        });
        prompt.present(&config).await;

        assert_eq!(*seen.lock().unwrap(), vec!["A".to_owned(), "Ad".to_owned()]);
        let observer = presenter.presented()[0].text_observer.clone().unwrap();
        assert!(!observer.is_active());
        observer.text_did_change(Some("Ada"));
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn no_callback_means_no_observer() {
        let presenter = ScriptedPresenter::new(vec![Ok(AlertResponse::action(0))]);
        let config = config_with(RecordingTranslator::new(&[]), presenter.clone());

        TextInputAlert::new("Name?")
            .present_translating(&config, Vec::new())
            .await;
        assert!(presenter.presented()[0].text_observer.is_none());
    }

    #[tokio::test]
    async fn empty_key_list_never_translates() {
        let translator = RecordingTranslator::new(&[("Name?", "Nom ?")]);
        let presenter = ScriptedPresenter::new(vec![Ok(AlertResponse::action(0))]);
        let config = config_with(translator.clone(), presenter.clone());

        TextInputAlert::new("Name?")
            .present_translating(&config, Vec::new())
            .await;

        assert!(translator.batches().is_empty());
        assert_eq!(presenter.presented()[0].message.as_deref(), Some("Name?"));
    }
}
