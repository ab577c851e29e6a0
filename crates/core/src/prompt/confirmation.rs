use crate::action::ActionStyle;
use crate::config::{AlertConfig, DEFAULT_CANCEL_BUTTON_TITLE, DEFAULT_CONFIRM_BUTTON_TITLE};
use crate::native::{NativeAlert, PresentationStyle};
use crate::prompt::{show, Overlays, Presentable};
use crate::text::AttributedStringConfig;
use crate::translate::{first_output, Translation};
use futures::future::BoxFuture;
use futures::FutureExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmationKey {
    CancelButtonTitle,
    ConfirmButtonTitle,
    Message,
    Title,
}

/// A yes/no question. Presenting it resolves to `true` only when the user
/// picks the confirm button.
#[derive(Clone, Debug)]
pub struct ConfirmationAlert {
    title: Option<String>,
    message: String,
    cancel_button_title: String,
    cancel_button_style: ActionStyle,
    confirm_button_title: String,
    confirm_button_style: ActionStyle,
    overlays: Overlays,
}

impl ConfirmationAlert {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            title: None,
            message: message.into(),
            cancel_button_title: DEFAULT_CANCEL_BUTTON_TITLE.to_owned(),
            cancel_button_style: ActionStyle::Cancel,
            confirm_button_title: DEFAULT_CONFIRM_BUTTON_TITLE.to_owned(),
            confirm_button_style: ActionStyle::Preferred,
            overlays: Overlays::default(),
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
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

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
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

impl Presentable for ConfirmationAlert {
    type Key = ConfirmationKey;
    type Response = bool;

    fn default_keys() -> Vec<ConfirmationKey> {
        vec![
            ConfirmationKey::CancelButtonTitle,
            ConfirmationKey::ConfirmButtonTitle,
            ConfirmationKey::Message,
            ConfirmationKey::Title,
        ]
    }

    fn source_texts(&self, key: &ConfirmationKey) -> Vec<String> {
        match key {
            ConfirmationKey::CancelButtonTitle => vec![self.cancel_button_title.clone()],
            ConfirmationKey::ConfirmButtonTitle => vec![self.confirm_button_title.clone()],
            ConfirmationKey::Message => vec![self.message.clone()],
            ConfirmationKey::Title => self.title.iter().cloned().collect(),
        }
    }

    fn rebuilt(&self, _keys: &[ConfirmationKey], translations: &[Translation]) -> Self {
        let field = |text: &str| first_output(translations, text);

        Self {
            title: self.title.as_deref().map(field),
            message: field(&self.message),
            cancel_button_title: field(&self.cancel_button_title),
            cancel_button_style: self.cancel_button_style,
            confirm_button_title: field(&self.confirm_button_title),
            confirm_button_style: self.confirm_button_style,
            overlays: self
                .overlays
                .anchored(Some(&self.message), self.title.as_deref()),
        }
    }

    fn present_native<'a>(&'a self, config: &'a AlertConfig) -> BoxFuture<'a, bool> {
        async move {
            let mut native = NativeAlert::new(
                PresentationStyle::Alert,
                self.title.as_deref(),
                Some(&self.message),
            );
            let (_, confirm) = native.push_button_pair(
                (&self.cancel_button_title, self.cancel_button_style),
                (&self.confirm_button_title, self.confirm_button_style),
            );
            self.overlays.apply(&mut native);

            show(config, native)
                .await
                .is_some_and(|response| response.action_index == confirm)
        }
        .boxed()
    }
}
