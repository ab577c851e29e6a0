use crate::config::{AlertConfig, HudConfig, LanguageCode, LanguagePair, TranslationTimeoutConfig};
use crate::delegate::{
    Callsite, InspectionDelegate, LoggerDelegate, PresentationDelegate, PresentationError,
    ReportDelegate,
};
use crate::native::{AlertResponse, NativeAlert, PresentedControl, ViewHandle};
use crate::prompt::Errorable;
use crate::text::{AttributeKey, AttributeValue, AttributedStringConfig, Attributes, StringAttributes};
use crate::translate::{Translation, TranslationError, TranslationInput, Translator};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Translates from a fixed table and records every batch it receives.
pub(crate) struct RecordingTranslator {
    table: HashMap<String, String>,
    outcome: Option<fn() -> TranslationError>,
    batches: Mutex<Vec<Vec<String>>>,
}

impl RecordingTranslator {
    pub(crate) fn new(table: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            table: table
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            outcome: None,
            batches: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Self::failing_with(|| TranslationError::Api("backend down".into()))
    }

    pub(crate) fn failing_with(error: fn() -> TranslationError) -> Arc<Self> {
        Arc::new(Self {
            table: HashMap::new(),
            outcome: Some(error),
            batches: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

impl Translator for RecordingTranslator {
    fn get_translations(
        &self,
        inputs: Vec<TranslationInput>,
        _language_pair: LanguagePair,
        _hud: Option<HudConfig>,
        _timeout: TranslationTimeoutConfig,
    ) -> BoxFuture<'_, Result<Vec<Translation>, TranslationError>> {
        async move {
            self.batches
                .lock()
                .unwrap()
                .push(inputs.iter().map(|i| i.value().to_owned()).collect());
            if let Some(error) = self.outcome {
                return Err(error());
            }
            // Inputs missing from the table get no output at all.
            Ok(inputs
                .into_iter()
                .filter_map(|input| {
                    let output = self.table.get(input.value())?.clone();
                    Some(Translation::new(input, output))
                })
                .collect())
        }
        .boxed()
    }
}

/// Answers presentations from a script and keeps what it was shown.
pub(crate) struct ScriptedPresenter {
    responses: Mutex<VecDeque<Result<AlertResponse, PresentationError>>>,
    presented: Mutex<Vec<NativeAlert>>,
    on_present: Option<fn(&NativeAlert)>,
}

impl ScriptedPresenter {
    pub(crate) fn new(responses: Vec<Result<AlertResponse, PresentationError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            presented: Mutex::new(Vec::new()),
            on_present: None,
        })
    }

    /// Like [`ScriptedPresenter::new`], running `hook` on each alert before
    /// answering.
    pub(crate) fn with_hook(
        responses: Vec<Result<AlertResponse, PresentationError>>,
        hook: fn(&NativeAlert),
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            presented: Mutex::new(Vec::new()),
            on_present: Some(hook),
        })
    }

    pub(crate) fn presented(&self) -> Vec<NativeAlert> {
        self.presented.lock().unwrap().clone()
    }
}

impl PresentationDelegate for ScriptedPresenter {
    fn presented_controls(&self) -> Vec<Arc<dyn PresentedControl>> {
        Vec::new()
    }

    fn present(&self, alert: NativeAlert) -> BoxFuture<'_, Result<AlertResponse, PresentationError>> {
        async move {
            if let Some(hook) = self.on_present {
                hook(&alert);
            }
            self.presented.lock().unwrap().push(alert);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(PresentationError::Dismissed))
        }
        .boxed()
    }
}

pub(crate) struct RecordingLogger {
    reports_automatically: bool,
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub(crate) fn new(reports_automatically: bool) -> Arc<Self> {
        Arc::new(Self {
            reports_automatically,
            lines: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl LoggerDelegate for RecordingLogger {
    fn reports_errors_automatically(&self) -> bool {
        self.reports_automatically
    }

    fn log(&self, text: &str, _callsite: Callsite) {
        self.lines.lock().unwrap().push(text.to_owned());
    }
}

#[derive(Default)]
pub(crate) struct RecordingReporter {
    reports: Mutex<Vec<(String, String)>>,
}

impl RecordingReporter {
    /// `(id, description)` of every filed report.
    pub(crate) fn reports(&self) -> Vec<(String, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ReportDelegate for RecordingReporter {
    fn file_report(&self, error: &dyn Errorable) {
        self.reports
            .lock()
            .unwrap()
            .push((error.id().to_owned(), error.description()));
    }
}

pub(crate) struct TaggedViews(pub(crate) HashMap<String, ViewHandle>);

impl InspectionDelegate for TaggedViews {
    fn source_view(&self, tag: &str) -> Option<ViewHandle> {
        self.0.get(tag).cloned()
    }
}

pub(crate) fn french() -> LanguagePair {
    LanguagePair::new(
        LanguageCode::new("en").unwrap(),
        LanguageCode::new("fr").unwrap(),
    )
}

pub(crate) fn config_with(
    translator: Arc<RecordingTranslator>,
    presenter: Arc<ScriptedPresenter>,
) -> AlertConfig {
    AlertConfig::new(french())
        .with_translator(translator)
        .with_presenter(presenter)
}

pub(crate) fn bold_config(substrings: &[&str]) -> AttributedStringConfig {
    let mut primary = Attributes::new();
    primary.insert(AttributeKey::Font, AttributeValue::Text("bold".into()));
    let secondary = if substrings.is_empty() {
        None
    } else {
        let mut attrs = Attributes::new();
        attrs.insert(AttributeKey::Underline, AttributeValue::Flag(true));
        Some(vec![StringAttributes::new(
            attrs,
            substrings.iter().map(|s| (*s).to_owned()).collect(),
        )])
    };
    AttributedStringConfig::new(primary, secondary)
}
