use crate::delegate::{Callsite, LoggerDelegate};

const LOG_TARGET: &str = "alertkit";

/// Forwards delegate log lines to `tracing`.
#[derive(Clone, Debug, Default)]
pub struct TracingLogger {
    reports_errors_automatically: bool,
}

impl TracingLogger {
    pub fn new(reports_errors_automatically: bool) -> Self {
        Self {
            reports_errors_automatically,
        }
    }
}

impl LoggerDelegate for TracingLogger {
    fn reports_errors_automatically(&self) -> bool {
        self.reports_errors_automatically
    }

    fn log(&self, text: &str, callsite: Callsite) {
        tracing::warn!(
            target: LOG_TARGET,
            file = callsite.file,
            module = callsite.module,
            line = callsite.line,
            "{text}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callsite_macro_points_at_invocation() {
        let site = crate::callsite!();
        assert!(site.file.ends_with("tracing_logger.rs"));
        assert!(site.module.ends_with("tracing_logger::tests"));
        assert!(site.line > 0);
    }

    #[test]
    fn reports_flag_is_configurable() {
        assert!(!TracingLogger::default().reports_errors_automatically());
        assert!(TracingLogger::new(true).reports_errors_automatically());
    }
}
