#![deny(warnings)]

use alertkit_core::action::{Action, ActionStyle};
use alertkit_core::config::{
    resolve_language_code, resolve_optional_string, AlertConfig, Env, LanguageCode, LanguagePair,
    StdEnv, TranslationTimeoutConfig, DEFAULT_TIMEOUT_MS, ENV_DEEPL_API_KEY, ENV_SOURCE_LANG,
    ENV_TARGET_LANG,
};
use alertkit_core::delegate::{PresentationDelegate, PresentationError, ReportDelegate, TracingLogger};
use alertkit_core::native::{AlertResponse, NativeAction, NativeAlert, PresentedControl};
use alertkit_core::prompt::{
    ActionSheet, Alert, ConfirmationAlert, ErrorAlert, Errorable, Presentable, SimpleError,
    TextInputAlert,
};
use alertkit_core::text_field::TextFieldAttributes;
use alertkit_core::translate::{DeepLTranslator, HudIndicator, IdentityTranslator, TimeoutTranslator};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Alert,
    Sheet,
    Confirm,
    Error,
    Input,
}

#[derive(Parser, Debug)]
#[command(name = "alertkit")]
#[command(about = "Present a translated prompt on the terminal")]
struct Args {
    #[arg(long, value_enum, default_value_t = Kind::Alert)]
    kind: Kind,

    #[arg(long)]
    message: String,

    #[arg(long)]
    title: Option<String>,

    /// Action titles for alerts and sheets, in order.
    #[arg(long = "action")]
    actions: Vec<String>,

    /// Placeholder shown in the text field of an input prompt.
    #[arg(long)]
    placeholder: Option<String>,

    #[arg(long, default_value = "E000")]
    error_id: String,

    #[arg(long)]
    source_lang: Option<String>,

    #[arg(long)]
    target_lang: Option<String>,

    #[arg(long)]
    deepl_api_key: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Fail the translation on timeout instead of showing the source text.
    #[arg(long)]
    fail_on_timeout: bool,

    #[arg(long)]
    no_translate: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let config = build_config(&args, &env)?.with_presenter(Arc::new(TerminalPresenter::new()));

    tracing::info!(
        source = %config.language_pair().source,
        target = %config.language_pair().target,
        kind = ?args.kind,
        "config loaded"
    );

    run(args, &config).await
}

async fn run(args: Args, config: &AlertConfig) -> anyhow::Result<()> {
    let translate = !args.no_translate;

    match args.kind {
        Kind::Alert => {
            let actions = if args.actions.is_empty() {
                vec![Action::dismiss()]
            } else {
                printing_actions(&args.actions)
            };
            let alert = Alert::new(args.title, Some(args.message), actions);
            present(&alert, config, translate).await;
        }
        Kind::Sheet => {
            if args.actions.is_empty() {
                anyhow::bail!("--action is required at least once for --kind sheet");
            }
            let sheet = ActionSheet::new(args.title, Some(args.message), printing_actions(&args.actions));
            present(&sheet, config, translate).await;
        }
        Kind::Confirm => {
            let mut prompt = ConfirmationAlert::new(args.message);
            if let Some(title) = args.title {
                prompt = prompt.with_title(title);
            }
            let confirmed = present(&prompt, config, translate).await;
            println!("{}", if confirmed { "confirmed" } else { "cancelled" });
        }
        Kind::Error => {
            let error = SimpleError::new(args.message, args.error_id).reportable();
            present(&ErrorAlert::new(Arc::new(error)), config, translate).await;
        }
        Kind::Input => {
            let mut prompt = TextInputAlert::new(args.message);
            if let Some(title) = args.title {
                prompt = prompt.with_title(title);
            }
            if let Some(placeholder) = args.placeholder {
                prompt = prompt
                    .with_attributes(TextFieldAttributes::default().replacing_placeholder_text(placeholder));
            }
            prompt.on_text_field_change(|text| {
                tracing::debug!(len = text.map_or(0, str::len), "text field changed");
            });
            match present(&prompt, config, translate).await {
                Some(text) => println!("{text}"),
                None => println!("cancelled"),
            }
        }
    }
    Ok(())
}

async fn present<P: Presentable>(prompt: &P, config: &AlertConfig, translate: bool) -> P::Response {
    if translate {
        prompt.present(config).await
    } else {
        prompt.present_translating(config, Vec::new()).await
    }
}

fn printing_actions(titles: &[String]) -> Vec<Action> {
    titles
        .iter()
        .map(|title| {
            let chosen = title.clone();
            Action::new(title.clone(), ActionStyle::Default, move || {
                println!("selected: {chosen}");
            })
        })
        .collect()
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(args: &Args, env: &impl Env) -> anyhow::Result<AlertConfig> {
    let source = resolve_language_code(
        args.source_lang.clone(),
        ENV_SOURCE_LANG,
        env,
        &LanguageCode::default(),
    )
    .context("invalid source language")?;
    let system = LanguageCode::system(env).unwrap_or_else(|| source.clone());
    let target = resolve_language_code(args.target_lang.clone(), ENV_TARGET_LANG, env, &system)
        .context("invalid target language")?;

    let timeout =
        TranslationTimeoutConfig::new(Duration::from_millis(args.timeout_ms), !args.fail_on_timeout)?;

    let config = AlertConfig::new(LanguagePair::new(source, target))
        .with_timeout(timeout)
        .with_logger(Arc::new(TracingLogger::new(false)))
        .with_reporter(Arc::new(LogReporter));

    let config = match resolve_optional_string(args.deepl_api_key.clone(), ENV_DEEPL_API_KEY, env) {
        Some(key) => config.with_translator(Arc::new(
            TimeoutTranslator::new(DeepLTranslator::new(key)).with_hud(Arc::new(TerminalHud)),
        )),
        None => {
            tracing::info!("no DeepL API key, prompts are shown in the source language");
            config.with_translator(Arc::new(IdentityTranslator::new()))
        }
    };
    Ok(config)
}

struct TerminalHud;

impl HudIndicator for TerminalHud {
    fn show(&self, _is_modal: bool) {
        eprintln!("translating...");
    }

    fn hide(&self) {}
}

struct LogReporter;

impl ReportDelegate for LogReporter {
    fn file_report(&self, error: &dyn Errorable) {
        tracing::info!(id = error.id(), description = %error.description(), "error report filed");
        println!("report filed for {}", error.id());
    }
}

/// Prints prompts to stdout and reads answers line by line from stdin.
struct TerminalPresenter {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalPresenter {
    fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl PresentationDelegate for TerminalPresenter {
    fn presented_controls(&self) -> Vec<Arc<dyn PresentedControl>> {
        Vec::new()
    }

    fn present(&self, alert: NativeAlert) -> BoxFuture<'_, Result<AlertResponse, PresentationError>> {
        async move {
            let mut lines = self.lines.lock().await;
            print!("{}", render(&alert));

            let text = match &alert.text_field {
                Some(field) => {
                    print_prompt(&format!("{}> ", field.placeholder_text.as_deref().unwrap_or("")));
                    let line = next_line(&mut lines).await?;
                    if let Some(observer) = &alert.text_observer {
                        observer.text_did_change(Some(&line));
                    }
                    Some(line)
                }
                None => None,
            };

            loop {
                print_prompt("choice> ");
                let line = next_line(&mut lines).await?;
                match parse_choice(&line, &alert.actions) {
                    Some(action_index) => {
                        if let Some(observer) = &alert.text_observer {
                            observer.window_did_hide();
                        }
                        return Ok(AlertResponse { action_index, text });
                    }
                    None => eprintln!("enter the number of an enabled action"),
                }
            }
        }
        .boxed()
    }
}

fn print_prompt(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

async fn next_line(lines: &mut Lines<BufReader<Stdin>>) -> Result<String, PresentationError> {
    match lines.next_line().await {
        Ok(Some(line)) => Ok(line.trim().to_owned()),
        Ok(None) => Err(PresentationError::Dismissed),
        Err(e) => Err(PresentationError::Unavailable(e.to_string())),
    }
}

fn render(alert: &NativeAlert) -> String {
    let mut out = String::new();
    if let Some(title) = &alert.title {
        out.push_str(&format!("== {title} ==\n"));
    }
    if let Some(message) = &alert.message {
        out.push_str(message.trim());
        out.push('\n');
    }
    if let Some(view) = &alert.source_view {
        out.push_str(&format!("(from {})\n", view.0));
    }
    for (i, action) in alert.actions.iter().enumerate() {
        let marker = if alert.preferred_action == Some(i) { '*' } else { ' ' };
        let state = if action.is_enabled { "" } else { " (disabled)" };
        out.push_str(&format!("{marker}{}. {}{state}\n", i + 1, action.title));
    }
    out
}

/// 1-based choice to action index; disabled actions cannot be picked.
fn parse_choice(line: &str, actions: &[NativeAction]) -> Option<usize> {
    let index = line.trim().parse::<usize>().ok()?.checked_sub(1)?;
    actions
        .get(index)
        .filter(|action| action.is_enabled)
        .map(|_| index)
}
