use crate::translate::{first_output, Translation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_ACTION_TITLE: &str = "OK";

pub type ActionEffect = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionStyle {
    #[default]
    Default,
    Cancel,
    Destructive,
    Preferred,
    DestructivePreferred,
}

/// How a presenter renders a button.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NativeActionStyle {
    Default,
    Cancel,
    Destructive,
}

impl ActionStyle {
    pub fn native(self) -> NativeActionStyle {
        match self {
            Self::Cancel => NativeActionStyle::Cancel,
            Self::Default | Self::Preferred => NativeActionStyle::Default,
            Self::Destructive | Self::DestructivePreferred => NativeActionStyle::Destructive,
        }
    }

    pub fn is_preferred(self) -> bool {
        matches!(self, Self::Preferred | Self::DestructivePreferred)
    }
}

/// A button on an alert or action sheet.
///
/// Every action carries a unique identity: two actions are equal only if they
/// are the same action, even when their visible fields match.
#[derive(Clone)]
pub struct Action {
    id: Uuid,
    title: String,
    is_enabled: bool,
    style: ActionStyle,
    effect: ActionEffect,
}

impl Action {
    pub fn new<S, F>(title: S, style: ActionStyle, effect: F) -> Self
    where
        S: Into<String>,
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_enabled: true,
            style,
            effect: Arc::new(effect),
        }
    }

    /// The `OK` action alerts fall back to when none is supplied.
    pub fn dismiss() -> Self {
        Self::new(DEFAULT_ACTION_TITLE, ActionStyle::Cancel, || {})
    }

    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn style(&self) -> ActionStyle {
        self.style
    }

    pub fn perform(&self) {
        (self.effect)();
    }

    /// A new action with `title` and a fresh identity; effect, style and
    /// enabled state are carried over.
    pub fn retitled<S: Into<String>>(&self, title: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_enabled: self.is_enabled,
            style: self.style,
            effect: Arc::clone(&self.effect),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.is_enabled == other.is_enabled
            && self.style == other.style
            && self.title == other.title
    }
}

impl Eq for Action {}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("is_enabled", &self.is_enabled)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Which actions of a prompt an `actions` field key asks to translate.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ActionSelection {
    Nothing,
    All,
    Only(Vec<Action>),
}

impl ActionSelection {
    /// Folds every `actions` key's filter; an empty filter selects all.
    pub(crate) fn from_filters<'a, I>(filters: I) -> Self
    where
        I: IntoIterator<Item = &'a [Action]>,
    {
        let mut selection = Self::Nothing;
        for filter in filters {
            selection = match (selection, filter.is_empty()) {
                (_, true) | (Self::All, _) => Self::All,
                (Self::Nothing, false) => Self::Only(filter.to_vec()),
                (Self::Only(mut named), false) => {
                    named.extend(filter.iter().cloned());
                    Self::Only(named)
                }
            };
        }
        selection
    }

    pub(crate) fn includes(&self, action: &Action) -> bool {
        match self {
            Self::Nothing => false,
            Self::All => true,
            Self::Only(named) => named.contains(action),
        }
    }

    pub(crate) fn titles(&self, actions: &[Action]) -> Vec<String> {
        actions
            .iter()
            .filter(|a| self.includes(a))
            .map(|a| a.title.clone())
            .collect()
    }

    /// Selected actions are re-emitted with translated titles; the rest are
    /// kept as they are.
    pub(crate) fn translate(&self, actions: &[Action], translations: &[Translation]) -> Vec<Action> {
        actions
            .iter()
            .map(|action| {
                if self.includes(action) {
                    action.retitled(first_output(translations, &action.title))
                } else {
                    action.clone()
                }
            })
            .collect()
    }
}
