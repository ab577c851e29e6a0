//! Capabilities the host application hands to [`AlertConfig`](crate::config::AlertConfig).

mod tracing_logger;

use crate::native::{AlertResponse, NativeAlert, PresentedControl, ViewHandle};
use crate::prompt::Errorable;
use futures::future::BoxFuture;
use std::sync::Arc;

pub use tracing_logger::TracingLogger;

/// Where a log line originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Callsite {
    pub file: &'static str,
    pub module: &'static str,
    pub line: u32,
}

/// Captures the [`Callsite`] of the invocation.
#[macro_export]
macro_rules! callsite {
    () => {
        $crate::delegate::Callsite {
            file: file!(),
            module: module_path!(),
            line: line!(),
        }
    };
}

pub trait LoggerDelegate: Send + Sync {
    /// When true, error alerts never offer a "send report" action.
    fn reports_errors_automatically(&self) -> bool;

    fn log(&self, text: &str, callsite: Callsite);
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
    #[error("alert dismissed without a selection")]
    Dismissed,

    #[error("presentation unavailable: {0}")]
    Unavailable(String),
}

pub trait PresentationDelegate: Send + Sync {
    /// Alerts currently on screen, most recent last.
    fn presented_controls(&self) -> Vec<Arc<dyn PresentedControl>>;

    /// Shows `alert` and resolves once the user picks one of its actions.
    fn present(&self, alert: NativeAlert)
        -> BoxFuture<'_, Result<AlertResponse, PresentationError>>;
}

pub trait ReportDelegate: Send + Sync {
    fn file_report(&self, error: &dyn Errorable);
}

pub trait InspectionDelegate: Send + Sync {
    /// The view tagged with `tag`, used to anchor action sheets on wide layouts.
    fn source_view(&self, tag: &str) -> Option<ViewHandle>;
}
