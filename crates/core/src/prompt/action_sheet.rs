use crate::action::{Action, ActionSelection, ActionStyle};
use crate::config::{AlertConfig, DEFAULT_CANCEL_BUTTON_TITLE};
use crate::native::{NativeAlert, PresentationStyle, ViewHandle};
use crate::prompt::{show, Overlays, Presentable};
use crate::text::AttributedStringConfig;
use crate::translate::{first_output, Translation};
use futures::future::BoxFuture;
use futures::FutureExt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomSourceItem {
    /// A view the inspection delegate looks up by tag.
    Tag(String),
    View(ViewHandle),
}

/// What a sheet points at on layouts where it is shown as a popover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceItem {
    Custom(CustomSourceItem),
    /// The view tagged with the sheet's message.
    Message,
    /// The view tagged with the sheet's title.
    Title,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActionSheetKey {
    Actions(Vec<Action>),
    CancelButtonTitle,
    Message,
    Title,
}

#[derive(Clone, Debug)]
pub struct ActionSheet {
    title: Option<String>,
    message: Option<String>,
    actions: Vec<Action>,
    cancel_button_title: String,
    source_item: Option<SourceItem>,
    overlays: Overlays,
}

impl ActionSheet {
    /// Panics if `actions` is empty.
    pub fn new(title: Option<String>, message: Option<String>, actions: Vec<Action>) -> Self {
        assert!(!actions.is_empty(), "action sheets require at least one action");
        Self {
            title,
            message,
            actions,
            cancel_button_title: DEFAULT_CANCEL_BUTTON_TITLE.to_owned(),
            source_item: None,
            overlays: Overlays::default(),
        }
    }

    pub fn with_cancel_button_title<S: Into<String>>(mut self, title: S) -> Self {
        self.cancel_button_title = title.into();
        self
    }

    pub fn with_source_item(mut self, source_item: SourceItem) -> Self {
        self.source_item = Some(source_item);
        self
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

    pub fn cancel_button_title(&self) -> &str {
        &self.cancel_button_title
    }

    pub fn source_item(&self) -> Option<&SourceItem> {
        self.source_item.as_ref()
    }

    pub fn set_message_attributes(&mut self, config: AttributedStringConfig) {
        self.overlays.set_message(config);
    }

    pub fn set_title_attributes(&mut self, config: AttributedStringConfig) {
        self.overlays.set_title(config);
    }

    fn has_cancel_action(&self) -> bool {
        self.actions.iter().any(|a| a.style() == ActionStyle::Cancel)
    }

    /// Text-derived anchors become tags on the text they derive from, so a
    /// translated sheet still finds the view tagged with the source text.
    fn pinned_source_item(&self) -> Option<SourceItem> {
        let pinned = |text: &Option<String>| {
            text.as_ref()
                .map(|t| SourceItem::Custom(CustomSourceItem::Tag(t.clone())))
        };
        match &self.source_item {
            Some(SourceItem::Message) => pinned(&self.message),
            Some(SourceItem::Title) => pinned(&self.title),
            other => other.clone(),
        }
    }

    fn source_view(&self, config: &AlertConfig) -> Option<ViewHandle> {
        let tag = match self.source_item.as_ref()? {
            SourceItem::Custom(CustomSourceItem::View(view)) => return Some(view.clone()),
            SourceItem::Custom(CustomSourceItem::Tag(tag)) => tag.as_str(),
            SourceItem::Message => self.message.as_deref()?,
            SourceItem::Title => self.title.as_deref()?,
        };
        config.inspector()?.source_view(tag)
    }

    fn native(&self, config: &AlertConfig) -> NativeAlert {
        // A lone title reads better in the message slot.
        let (title, message) = match (&self.title, &self.message) {
            (Some(title), None) => (None, Some(title.as_str())),
            (title, message) => (title.as_deref(), message.as_deref()),
        };
        let mut native = NativeAlert::new(PresentationStyle::ActionSheet, title, message);
        native.push_actions(&self.actions);
        if !self.has_cancel_action() {
            native.push_action(&self.cancel_button_title, ActionStyle::Cancel, true);
        }
        native.source_view = self.source_view(config);
        self.overlays.apply(&mut native);
        native
    }
}

impl Presentable for ActionSheet {
    type Key = ActionSheetKey;
    type Response = ();

    fn default_keys() -> Vec<ActionSheetKey> {
        vec![
            ActionSheetKey::Actions(Vec::new()),
            ActionSheetKey::CancelButtonTitle,
            ActionSheetKey::Message,
            ActionSheetKey::Title,
        ]
    }

    fn source_texts(&self, key: &ActionSheetKey) -> Vec<String> {
        match key {
            ActionSheetKey::Actions(filter) => {
                ActionSelection::from_filters([filter.as_slice()]).titles(&self.actions)
            }
            ActionSheetKey::CancelButtonTitle => vec![self.cancel_button_title.clone()],
            ActionSheetKey::Message => self.message.iter().cloned().collect(),
            ActionSheetKey::Title => self.title.iter().cloned().collect(),
        }
    }

    fn rebuilt(&self, keys: &[ActionSheetKey], translations: &[Translation]) -> Self {
        let selection = ActionSelection::from_filters(keys.iter().filter_map(|k| match k {
            ActionSheetKey::Actions(filter) => Some(filter.as_slice()),
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
            cancel_button_title: first_output(translations, &self.cancel_button_title),
            source_item: self.pinned_source_item(),
            overlays: self
                .overlays
                .anchored(self.message.as_deref(), self.title.as_deref()),
        }
    }

    fn present_native<'a>(&'a self, config: &'a AlertConfig) -> BoxFuture<'a, ()> {
        async move {
            let Some(response) = show(config, self.native(config)).await else {
                return;
            };
            // Past the end is the appended cancel button, which does nothing.
            if let Some(action) = self.actions.get(response.action_index) {
                action.perform();
            }
        }
        .boxed()
    }
}
