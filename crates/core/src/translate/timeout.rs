use crate::config::{HudConfig, LanguagePair, TranslationTimeoutConfig};
use crate::translate::{Translation, TranslationError, TranslationInput, Translator};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;

const LOG_TARGET: &str = "alertkit::translate::timeout";

/// The "taking a while" indicator shown during slow translations.
pub trait HudIndicator: Send + Sync {
    fn show(&self, is_modal: bool);
    fn hide(&self);
}

/// Wraps a backend with the timeout and HUD behavior the prompts ask for.
///
/// When the call outlives the configured duration it is abandoned. With
/// `returns_inputs_on_failure` set the inputs come back as their own outputs,
/// otherwise the call fails with [`TranslationError::TimedOut`].
#[derive(Clone)]
pub struct TimeoutTranslator<T> {
    inner: T,
    hud: Option<Arc<dyn HudIndicator>>,
}

impl<T> TimeoutTranslator<T>
where
    T: Translator,
{
    pub fn new(inner: T) -> Self {
        Self { inner, hud: None }
    }

    pub fn with_hud(mut self, hud: Arc<dyn HudIndicator>) -> Self {
        self.hud = Some(hud);
        self
    }
}

/// Hides the indicator when dropped, including when the call is abandoned.
struct ShownHud<'a>(&'a dyn HudIndicator);

impl<'a> ShownHud<'a> {
    fn show(indicator: &'a dyn HudIndicator, is_modal: bool) -> Self {
        indicator.show(is_modal);
        Self(indicator)
    }
}

impl Drop for ShownHud<'_> {
    fn drop(&mut self) {
        self.0.hide();
    }
}

/// Drives `call`, showing `indicator` once `config.appears_after()` has passed
/// and hiding it when the call completes or is dropped.
async fn with_hud<F>(call: F, indicator: &dyn HudIndicator, config: HudConfig) -> F::Output
where
    F: Future,
{
    tokio::pin!(call);
    tokio::select! {
        out = &mut call => return out,
        _ = tokio::time::sleep(config.appears_after()) => {}
    }

    let _shown = ShownHud::show(indicator, config.is_modal);
    call.await
}

impl<T> Translator for TimeoutTranslator<T>
where
    T: Translator,
{
    fn get_translations(
        &self,
        inputs: Vec<TranslationInput>,
        language_pair: LanguagePair,
        hud: Option<HudConfig>,
        timeout: TranslationTimeoutConfig,
    ) -> BoxFuture<'_, Result<Vec<Translation>, TranslationError>> {
        async move {
            let fallback = inputs.clone();
            let call = tokio::time::timeout(
                timeout.duration(),
                self.inner
                    .get_translations(inputs, language_pair, hud, timeout),
            );

            let outcome = match (self.hud.as_deref(), hud) {
                (Some(indicator), Some(config)) => with_hud(call, indicator, config).await,
                _ => call.await,
            };

            match outcome {
                Ok(result) => result,
                Err(_) if timeout.returns_inputs_on_failure => {
                    tracing::warn!(
                        target: LOG_TARGET,
                        after = ?timeout.duration(),
                        "translation timed out, returning inputs"
                    );
                    Ok(fallback.into_iter().map(Translation::unchanged).collect())
                }
                Err(_) => {
                    tracing::warn!(target: LOG_TARGET, after = ?timeout.duration(), "translation timed out");
                    Err(TranslationError::TimedOut(timeout.duration()))
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone)]
    struct SlowTranslator {
        delay: Duration,
    }

    impl Translator for SlowTranslator {
        fn get_translations(
            &self,
            inputs: Vec<TranslationInput>,
            _language_pair: LanguagePair,
            _hud: Option<HudConfig>,
            _timeout: TranslationTimeoutConfig,
        ) -> BoxFuture<'_, Result<Vec<Translation>, TranslationError>> {
            async move {
                tokio::time::sleep(self.delay).await;
                Ok(inputs
                    .into_iter()
                    .map(|i| {
                        let out = format!("fr:{}", i.value());
                        Translation::new(i, out)
                    })
                    .collect())
            }
            .boxed()
        }
    }

    #[derive(Default)]
    struct RecordingHud {
        events: Mutex<Vec<&'static str>>,
    }

    impl HudIndicator for RecordingHud {
        fn show(&self, is_modal: bool) {
            let event = if is_modal { "show-modal" } else { "show" };
            self.events.lock().unwrap().push(event);
        }

        fn hide(&self) {
            self.events.lock().unwrap().push("hide");
        }
    }

    fn inputs() -> Vec<TranslationInput> {
        vec![TranslationInput::new("Hello")]
    }

    fn timeout(ms: u64, returns_inputs: bool) -> TranslationTimeoutConfig {
        TranslationTimeoutConfig::new(Duration::from_millis(ms), returns_inputs).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn fast_backend_result_passes_through() {
        let translator = TimeoutTranslator::new(SlowTranslator {
            delay: Duration::from_millis(10),
        });
        let out = translator
            .get_translations(inputs(), LanguagePair::default(), None, timeout(1_000, false))
            .await
            .unwrap();
        assert_eq!(out[0].output, "fr:Hello");
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_returns_inputs_when_configured() {
        let translator = TimeoutTranslator::new(SlowTranslator {
            delay: Duration::from_secs(60),
        });
        let out = translator
            .get_translations(inputs(), LanguagePair::default(), None, timeout(100, true))
            .await
            .unwrap();
        assert_eq!(out, vec![Translation::unchanged(TranslationInput::new("Hello"))]);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_fails_when_inputs_not_returned() {
        let translator = TimeoutTranslator::new(SlowTranslator {
            delay: Duration::from_secs(60),
        });
        let err = translator
            .get_translations(inputs(), LanguagePair::default(), None, timeout(100, false))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::TimedOut(d) if d == Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn hud_appears_only_for_slow_calls() {
        let hud = Arc::new(RecordingHud::default());
        let translator = TimeoutTranslator::new(SlowTranslator {
            delay: Duration::from_millis(50),
        })
        .with_hud(hud.clone());
        let config = HudConfig::new(Duration::from_millis(200), true);

        translator
            .get_translations(inputs(), LanguagePair::default(), Some(config), timeout(1_000, false))
            .await
            .unwrap();
        assert!(hud.events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn hud_shows_then_hides_around_slow_calls() {
        let hud = Arc::new(RecordingHud::default());
        let translator = TimeoutTranslator::new(SlowTranslator {
            delay: Duration::from_millis(500),
        })
        .with_hud(hud.clone());
        let config = HudConfig::new(Duration::from_millis(200), false);

        translator
            .get_translations(inputs(), LanguagePair::default(), Some(config), timeout(1_000, false))
            .await
            .unwrap();
        assert_eq!(*hud.events.lock().unwrap(), vec!["show", "hide"]);
    }

    #[tokio::test(start_paused = true)]
    async fn hud_hides_when_caller_gives_up() {
        let hud = Arc::new(RecordingHud::default());
        let translator = TimeoutTranslator::new(SlowTranslator {
            delay: Duration::from_secs(10),
        })
        .with_hud(hud.clone());
        let config = HudConfig::new(Duration::from_millis(200), false);

        let call = translator.get_translations(
            inputs(),
            LanguagePair::default(),
            Some(config),
            timeout(60_000, false),
        );
        let abandoned = tokio::time::timeout(Duration::from_millis(300), call).await;

        assert!(abandoned.is_err());
        assert_eq!(*hud.events.lock().unwrap(), vec!["show", "hide"]);
    }
}
