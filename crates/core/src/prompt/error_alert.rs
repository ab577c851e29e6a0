use crate::action::ActionStyle;
use crate::config::{
    AlertConfig, DEFAULT_DISMISS_BUTTON_TITLE, DEFAULT_SEND_ERROR_REPORT_BUTTON_TITLE,
};
use crate::native::{NativeAlert, PresentationStyle};
use crate::prompt::{show, Presentable};
use crate::translate::{first_output, Translation};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// An application error that can be shown to, and reported by, the user.
pub trait Errorable: Send + Sync {
    fn description(&self) -> String;
    fn id(&self) -> &str;
    fn is_reportable(&self) -> bool;

    /// Extra context attached to filed reports.
    fn extra_params(&self) -> Option<&Map<String, Value>> {
        None
    }
}

/// A plain [`Errorable`] for callers without their own error type.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleError {
    pub description: String,
    pub id: String,
    pub is_reportable: bool,
    pub extra_params: Option<Map<String, Value>>,
}

impl SimpleError {
    pub fn new<D: Into<String>, I: Into<String>>(description: D, id: I) -> Self {
        Self {
            description: description.into(),
            id: id.into(),
            is_reportable: false,
            extra_params: None,
        }
    }

    pub fn reportable(mut self) -> Self {
        self.is_reportable = true;
        self
    }
}

impl Errorable for SimpleError {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn is_reportable(&self) -> bool {
        self.is_reportable
    }

    fn extra_params(&self) -> Option<&Map<String, Value>> {
        self.extra_params.as_ref()
    }
}

/// Wraps an [`Errorable`] with a description that translation rewrites in
/// place. Clones share the description.
#[derive(Clone)]
pub struct ErrorRecord {
    source: Arc<dyn Errorable>,
    description: Arc<RwLock<String>>,
}

impl ErrorRecord {
    pub fn new(source: Arc<dyn Errorable>) -> Self {
        let description = source.description();
        Self {
            source,
            description: Arc::new(RwLock::new(description)),
        }
    }

    pub fn set_description<S: Into<String>>(&self, description: S) {
        *self
            .description
            .write()
            .unwrap_or_else(PoisonError::into_inner) = description.into();
    }
}

impl Errorable for ErrorRecord {
    fn description(&self) -> String {
        self.description
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn id(&self) -> &str {
        self.source.id()
    }

    fn is_reportable(&self) -> bool {
        self.source.is_reportable()
    }

    fn extra_params(&self) -> Option<&Map<String, Value>> {
        self.source.extra_params()
    }
}

impl fmt::Debug for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorRecord")
            .field("id", &self.id())
            .field("description", &self.description())
            .field("is_reportable", &self.is_reportable())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorAlertKey {
    DismissButtonTitle,
    ErrorDescription,
    SendErrorReportButtonTitle,
}

#[derive(Clone, Debug)]
pub struct ErrorAlert {
    error: ErrorRecord,
    dismiss_button_title: String,
    send_error_report_button_title: String,
}

impl ErrorAlert {
    pub fn new(error: Arc<dyn Errorable>) -> Self {
        Self {
            error: ErrorRecord::new(error),
            dismiss_button_title: DEFAULT_DISMISS_BUTTON_TITLE.to_owned(),
            send_error_report_button_title: DEFAULT_SEND_ERROR_REPORT_BUTTON_TITLE.to_owned(),
        }
    }

    pub fn with_dismiss_button_title<S: Into<String>>(mut self, title: S) -> Self {
        self.dismiss_button_title = title.into();
        self
    }

    pub fn with_send_error_report_button_title<S: Into<String>>(mut self, title: S) -> Self {
        self.send_error_report_button_title = title.into();
        self
    }

    pub fn error(&self) -> &ErrorRecord {
        &self.error
    }

    pub fn dismiss_button_title(&self) -> &str {
        &self.dismiss_button_title
    }

    pub fn send_error_report_button_title(&self) -> &str {
        &self.send_error_report_button_title
    }

    /// Reporting is offered only when the logger does not already report
    /// errors on its own.
    fn offers_report(&self, config: &AlertConfig) -> bool {
        self.error.is_reportable()
            && config
                .logger()
                .is_some_and(|logger| !logger.reports_errors_automatically())
    }
}

impl Presentable for ErrorAlert {
    type Key = ErrorAlertKey;
    type Response = ();

    fn default_keys() -> Vec<ErrorAlertKey> {
        vec![
            ErrorAlertKey::DismissButtonTitle,
            ErrorAlertKey::ErrorDescription,
            ErrorAlertKey::SendErrorReportButtonTitle,
        ]
    }

    fn source_texts(&self, key: &ErrorAlertKey) -> Vec<String> {
        match key {
            ErrorAlertKey::DismissButtonTitle => vec![self.dismiss_button_title.clone()],
            ErrorAlertKey::ErrorDescription => vec![self.error.description()],
            ErrorAlertKey::SendErrorReportButtonTitle => {
                vec![self.send_error_report_button_title.clone()]
            }
        }
    }

    fn rebuilt(&self, _keys: &[ErrorAlertKey], translations: &[Translation]) -> Self {
        let field = |text: &str| first_output(translations, text);

        let description = field(&self.error.description());
        self.error.set_description(description);

        Self {
            error: self.error.clone(),
            dismiss_button_title: field(&self.dismiss_button_title),
            send_error_report_button_title: field(&self.send_error_report_button_title),
        }
    }

    fn present_native<'a>(&'a self, config: &'a AlertConfig) -> BoxFuture<'a, ()> {
        async move {
            let description = self.error.description();
            let offers_report = self.offers_report(config);

            let mut native = if offers_report {
                NativeAlert::new(PresentationStyle::Alert, None, Some(&description))
            } else {
                let id_line = format!("\n{}", self.error.id());
                NativeAlert::new(PresentationStyle::Alert, Some(&description), Some(&id_line))
            };

            let report_index = offers_report.then(|| {
                let index =
                    native.push_action(&self.send_error_report_button_title, ActionStyle::Default, true);
                native.preferred_action = Some(index);
                index
            });
            native.push_action(&self.dismiss_button_title, ActionStyle::Cancel, true);

            let Some(response) = show(config, native).await else {
                return;
            };
            if report_index == Some(response.action_index) {
                match config.reporter() {
                    Some(reporter) => reporter.file_report(&self.error),
                    None => tracing::warn!(
                        target: super::LOG_TARGET,
                        id = self.error.id(),
                        "no report delegate registered, dropping error report"
                    ),
                }
            }
        }
        .boxed()
    }
}
