use crate::delegate::{InspectionDelegate, LoggerDelegate, PresentationDelegate, ReportDelegate};
use crate::translate::Translator;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc, time::Duration};

pub const DEFAULT_SOURCE_LANG: &str = "en";
pub const DEFAULT_HUD_DELAY_MS: u64 = 2_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const ENV_SOURCE_LANG: &str = "ALERTKIT_SOURCE_LANG";
pub const ENV_TARGET_LANG: &str = "ALERTKIT_TARGET_LANG";
pub const ENV_DEEPL_API_KEY: &str = "DEEPL_API_KEY";

pub const DEFAULT_CANCEL_BUTTON_TITLE: &str = "Cancel";
pub const DEFAULT_CONFIRM_BUTTON_TITLE: &str = "Confirm";
pub const DEFAULT_DISMISS_BUTTON_TITLE: &str = "Dismiss";
pub const DEFAULT_SEND_ERROR_REPORT_BUTTON_TITLE: &str = "Send Error Report";

/// Locale variables consulted, in order, for the system language.
const SYSTEM_LOCALE_KEYS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Accepts `xx` or `xx-REGION` style codes.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let v = value.into();
        let v = v.trim();
        if v.is_empty() {
            return Err(ConfigError::EmptyLanguageCode);
        }

        let primary = v.split('-').next().unwrap_or_default();
        let valid = primary.len() >= 2
            && primary.chars().all(|c| c.is_ascii_alphabetic())
            && v.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(ConfigError::InvalidLanguageCode(v.to_owned()));
        }
        Ok(Self(v.to_owned()))
    }

    /// The language of the running system, from the POSIX locale variables.
    pub fn system(env: &impl Env) -> Option<Self> {
        SYSTEM_LOCALE_KEYS
            .iter()
            .filter_map(|key| env.var(key))
            .map(|v| v.trim().to_owned())
            .find(|v| !v.is_empty())
            .filter(|v| v != "C" && v != "POSIX")
            .and_then(|v| {
                let code: String = v.chars().take(2).collect::<String>().to_lowercase();
                Self::new(code).ok()
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before any region suffix.
    pub fn primary_subtag(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_SOURCE_LANG.to_owned())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl LanguagePair {
    pub fn new(source: LanguageCode, target: LanguageCode) -> Self {
        Self { source, target }
    }

    /// Source is the baseline language; target is the system language, or the
    /// source when none is set.
    pub fn from_env(env: &impl Env) -> Self {
        let source = LanguageCode::default();
        let target = LanguageCode::system(env).unwrap_or_else(|| source.clone());
        Self { source, target }
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::from_env(&StdEnv)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HudConfig {
    pub appears_after_ms: u64,
    pub is_modal: bool,
}

impl HudConfig {
    pub fn new(appears_after: Duration, is_modal: bool) -> Self {
        Self {
            appears_after_ms: u64::try_from(appears_after.as_millis()).unwrap_or(u64::MAX),
            is_modal,
        }
    }

    pub fn appears_after(&self) -> Duration {
        Duration::from_millis(self.appears_after_ms)
    }
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            appears_after_ms: DEFAULT_HUD_DELAY_MS,
            is_modal: true,
        }
    }
}

/// Deserializing goes through [`TranslationTimeoutConfig::new`], so a zero
/// duration is rejected there too.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawTimeoutConfig")]
pub struct TranslationTimeoutConfig {
    duration_ms: u64,
    pub returns_inputs_on_failure: bool,
}

#[derive(Deserialize)]
struct RawTimeoutConfig {
    duration_ms: u64,
    returns_inputs_on_failure: bool,
}

impl TryFrom<RawTimeoutConfig> for TranslationTimeoutConfig {
    type Error = ConfigError;

    fn try_from(raw: RawTimeoutConfig) -> Result<Self, Self::Error> {
        Self::new(
            Duration::from_millis(raw.duration_ms),
            raw.returns_inputs_on_failure,
        )
    }
}

impl TranslationTimeoutConfig {
    pub fn new(duration: Duration, returns_inputs_on_failure: bool) -> Result<Self, ConfigError> {
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        if duration_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            duration_ms,
            returns_inputs_on_failure,
        })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for TranslationTimeoutConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_TIMEOUT_MS,
            returns_inputs_on_failure: true,
        }
    }
}

/// Everything a prompt reads while translating and presenting itself.
///
/// Built once by the host with the `with_*` registration methods and then
/// shared read-only with every presentation.
#[derive(Clone)]
pub struct AlertConfig {
    language_pair: LanguagePair,
    hud: Option<HudConfig>,
    timeout: TranslationTimeoutConfig,
    translator: Option<Arc<dyn Translator>>,
    logger: Option<Arc<dyn LoggerDelegate>>,
    presenter: Option<Arc<dyn PresentationDelegate>>,
    reporter: Option<Arc<dyn ReportDelegate>>,
    inspector: Option<Arc<dyn InspectionDelegate>>,
}

impl AlertConfig {
    pub fn new(language_pair: LanguagePair) -> Self {
        Self {
            language_pair,
            hud: Some(HudConfig::default()),
            timeout: TranslationTimeoutConfig::default(),
            translator: None,
            logger: None,
            presenter: None,
            reporter: None,
            inspector: None,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn LoggerDelegate>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_presenter(mut self, presenter: Arc<dyn PresentationDelegate>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ReportDelegate>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn with_inspector(mut self, inspector: Arc<dyn InspectionDelegate>) -> Self {
        self.inspector = Some(inspector);
        self
    }

    pub fn with_source_language(mut self, source: LanguageCode) -> Self {
        self.language_pair.source = source;
        self
    }

    pub fn with_target_language(mut self, target: LanguageCode) -> Self {
        self.language_pair.target = target;
        self
    }

    /// `None` disables the busy indicator.
    pub fn with_hud(mut self, hud: Option<HudConfig>) -> Self {
        self.hud = hud;
        self
    }

    pub fn with_timeout(mut self, timeout: TranslationTimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn language_pair(&self) -> &LanguagePair {
        &self.language_pair
    }

    pub fn hud(&self) -> Option<HudConfig> {
        self.hud
    }

    pub fn timeout(&self) -> TranslationTimeoutConfig {
        self.timeout
    }

    pub fn translator(&self) -> Option<&dyn Translator> {
        self.translator.as_deref()
    }

    pub fn logger(&self) -> Option<&dyn LoggerDelegate> {
        self.logger.as_deref()
    }

    pub fn presenter(&self) -> Option<&dyn PresentationDelegate> {
        self.presenter.as_deref()
    }

    pub fn reporter(&self) -> Option<&dyn ReportDelegate> {
        self.reporter.as_deref()
    }

    pub fn inspector(&self) -> Option<&dyn InspectionDelegate> {
        self.inspector.as_deref()
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self::new(LanguagePair::default())
    }
}

impl fmt::Debug for AlertConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertConfig")
            .field("language_pair", &self.language_pair)
            .field("hud", &self.hud)
            .field("timeout", &self.timeout)
            .field("translator", &self.translator.is_some())
            .field("logger", &self.logger.is_some())
            .field("presenter", &self.presenter.is_some())
            .field("reporter", &self.reporter.is_some())
            .field("inspector", &self.inspector.is_some())
            .finish()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("language code must not be empty")]
    EmptyLanguageCode,
    #[error("invalid language code: {0}")]
    InvalidLanguageCode(String),
    #[error("translation timeout must be > 0 ms")]
    ZeroTimeout,
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_language_code(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
    default: &LanguageCode,
) -> Result<LanguageCode, ConfigError> {
    match cli_value.or_else(|| env.var(env_key)) {
        Some(v) => LanguageCode::new(v),
        None => Ok(default.clone()),
    }
}

pub fn resolve_optional_string(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Option<String> {
    match cli_value {
        Some(v) => Some(v),
        None => env.var(env_key),
    }
}
