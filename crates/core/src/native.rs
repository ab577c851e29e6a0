//! The descriptor handed to the presentation delegate, and the live controls
//! it hands back.

use crate::action::{Action, ActionStyle, NativeActionStyle};
use crate::config::AlertConfig;
use crate::text::{sanitized, AttributedText};
use crate::text_field::TextFieldAttributes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Opaque reference to a host view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub String);

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PresentationStyle {
    Alert,
    ActionSheet,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeAction {
    pub title: String,
    pub style: NativeActionStyle,
    pub is_enabled: bool,
}

/// What the user did with a presented alert.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertResponse {
    pub action_index: usize,
    /// Contents of the text field when the action was chosen.
    pub text: Option<String>,
}

impl AlertResponse {
    pub fn action(action_index: usize) -> Self {
        Self {
            action_index,
            text: None,
        }
    }

    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A fully resolved, sanitized alert ready to draw.
#[derive(Clone, Debug)]
pub struct NativeAlert {
    pub style: PresentationStyle,
    pub title: Option<String>,
    pub message: Option<String>,
    pub attributed_title: Option<AttributedText>,
    pub attributed_message: Option<AttributedText>,
    pub actions: Vec<NativeAction>,
    pub preferred_action: Option<usize>,
    pub text_field: Option<TextFieldAttributes>,
    pub source_view: Option<ViewHandle>,
    pub text_observer: Option<TextFieldObserver>,
}

impl NativeAlert {
    pub(crate) fn new(style: PresentationStyle, title: Option<&str>, message: Option<&str>) -> Self {
        Self {
            style,
            title: title.map(sanitized),
            message: message.map(sanitized),
            attributed_title: None,
            attributed_message: None,
            actions: Vec::new(),
            preferred_action: None,
            text_field: None,
            source_view: None,
            text_observer: None,
        }
    }

    pub(crate) fn push_action(&mut self, title: &str, style: ActionStyle, is_enabled: bool) -> usize {
        self.actions.push(NativeAction {
            title: sanitized(title),
            style: style.native(),
            is_enabled,
        });
        self.actions.len() - 1
    }

    /// Adds `actions` in order; the last one with a preferred style becomes
    /// the preferred action.
    pub(crate) fn push_actions(&mut self, actions: &[Action]) {
        for action in actions {
            let index = self.push_action(action.title(), action.style(), action.is_enabled());
            if action.style().is_preferred() {
                self.preferred_action = Some(index);
            }
        }
    }

    /// Adds a cancel/confirm pair and returns their indices. A preferred
    /// cancel style wins over a preferred confirm style.
    pub(crate) fn push_button_pair(
        &mut self,
        cancel: (&str, ActionStyle),
        confirm: (&str, ActionStyle),
    ) -> (usize, usize) {
        let cancel_index = self.push_action(cancel.0, cancel.1, true);
        let confirm_index = self.push_action(confirm.0, confirm.1, true);

        if cancel.1.is_preferred() {
            self.preferred_action = Some(cancel_index);
        } else if confirm.1.is_preferred() {
            self.preferred_action = Some(confirm_index);
        }
        (cancel_index, confirm_index)
    }
}

/// An alert currently on screen.
pub trait PresentedControl: Send + Sync {
    fn action_count(&self) -> usize;
    fn set_action_enabled(&self, index: usize, is_enabled: bool);
}

/// Toggles the action at `index` on every alert currently on screen. Controls
/// with fewer actions are left alone.
pub fn set_action_enabled(config: &AlertConfig, index: usize, is_enabled: bool) {
    let Some(presenter) = config.presenter() else {
        return;
    };
    for control in presenter.presented_controls() {
        if index < control.action_count() {
            control.set_action_enabled(index, is_enabled);
        }
    }
}

pub fn enable_action(config: &AlertConfig, index: usize) {
    set_action_enabled(config, index, true);
}

pub fn disable_action(config: &AlertConfig, index: usize) {
    set_action_enabled(config, index, false);
}

pub type TextChangeCallback = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// Keystroke sink a presenter feeds while a text input alert is on screen.
///
/// Inert once the owning [`Subscription`] is dropped or the presenter reports
/// the window hidden.
#[derive(Clone)]
pub struct TextFieldObserver {
    callback: Arc<Mutex<Option<TextChangeCallback>>>,
}

impl TextFieldObserver {
    pub(crate) fn subscribe(callback: TextChangeCallback) -> (Self, Subscription) {
        let observer = Self {
            callback: Arc::new(Mutex::new(Some(callback))),
        };
        let subscription = Subscription {
            observer: observer.clone(),
        };
        (observer, subscription)
    }

    pub fn text_did_change(&self, text: Option<&str>) {
        let callback = self
            .callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(callback) = callback {
            callback(text);
        }
    }

    pub fn window_did_hide(&self) {
        self.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn cancel(&self) {
        self.callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl fmt::Debug for TextFieldObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFieldObserver")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Scope guard for a [`TextFieldObserver`]; dropping it tears the observation
/// down.
#[must_use = "dropping the subscription cancels the observation"]
pub struct Subscription {
    observer: TextFieldObserver,
}

impl Subscription {
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.observer.cancel();
    }
}
