use crate::action::{Action, ActionSelection};
use crate::config::AlertConfig;
use crate::native::{NativeAlert, PresentationStyle};
use crate::prompt::{show, Overlays, Presentable};
use crate::text::AttributedStringConfig;
use crate::translate::{first_output, Translation};
use futures::future::BoxFuture;
use futures::FutureExt;

#[derive(Clone, Debug, PartialEq)]
pub enum AlertKey {
    /// Titles of the named actions; an empty list means every action.
    Actions(Vec<Action>),
    Message,
    Title,
}

impl AlertKey {
    pub fn all_actions() -> Self {
        Self::Actions(Vec::new())
    }
}

/// A modal alert with one or more actions.
#[derive(Clone, Debug)]
pub struct Alert {
    title: Option<String>,
    message: Option<String>,
    actions: Vec<Action>,
    overlays: Overlays,
}

impl Alert {
    /// Panics if `actions` is empty.
    pub fn new(title: Option<String>, message: Option<String>, actions: Vec<Action>) -> Self {
        assert!(!actions.is_empty(), "alerts require at least one action");
        Self {
            title,
            message,
            actions,
            overlays: Overlays::default(),
        }
    }

    /// A message with a single `OK` action.
    pub fn with_message<S: Into<String>>(message: S) -> Self {
        Self::new(None, Some(message.into()), vec![Action::dismiss()])
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn set_message_attributes(&mut self, config: AttributedStringConfig) {
        self.overlays.set_message(config);
    }

    pub fn set_title_attributes(&mut self, config: AttributedStringConfig) {
        self.overlays.set_title(config);
    }

    fn native(&self) -> NativeAlert {
        let mut native = NativeAlert::new(
            PresentationStyle::Alert,
            self.title.as_deref(),
            self.message.as_deref(),
        );
        native.push_actions(&self.actions);
        self.overlays.apply(&mut native);
        native
    }
}

impl Presentable for Alert {
    type Key = AlertKey;
    type Response = ();

    fn default_keys() -> Vec<AlertKey> {
        vec![AlertKey::all_actions(), AlertKey::Message, AlertKey::Title]
    }

    fn source_texts(&self, key: &AlertKey) -> Vec<String> {
        match key {
            AlertKey::Actions(filter) => {
                ActionSelection::from_filters([filter.as_slice()]).titles(&self.actions)
            }
            AlertKey::Message => self.message.iter().cloned().collect(),
            AlertKey::Title => self.title.iter().cloned().collect(),
        }
    }

    fn rebuilt(&self, keys: &[AlertKey], translations: &[Translation]) -> Self {
        let selection = ActionSelection::from_filters(keys.iter().filter_map(|k| match k {
            AlertKey::Actions(filter) => Some(filter.as_slice()),
            _ => None,
        }));

        Self {
            title: self
                .title
                .as_deref()
                .map(|t| first_output(translations, t)),
            message: self
                .message
                .as_deref()
                .map(|m| first_output(translations, m)),
            actions: selection.translate(&self.actions, translations),
            overlays: self
                .overlays
                .anchored(self.message.as_deref(), self.title.as_deref()),
        }
    }

    fn present_native<'a>(&'a self, config: &'a AlertConfig) -> BoxFuture<'a, ()> {
        async move {
            let Some(response) = show(config, self.native()).await else {
                return;
            };
            if let Some(action) = self.actions.get(response.action_index) {
                action.perform();
            }
        }
        .boxed()
    }
}
