use console::Style;
use docpix_core::edit::Notifier;
use docpix_core::error::Severity;

/// Prints session notifications to the terminal.
pub struct ConsoleNotifier {
    success: Style,
    warning: Style,
    error: Style,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self {
            success: Style::new().green().bold(),
            warning: Style::new().yellow().bold(),
            error: Style::new().red().bold(),
        }
    }

    fn style(&self, severity: Severity) -> &Style {
        match severity {
            Severity::Success => &self.success,
            Severity::Warning => &self.warning,
            Severity::Error => &self.error,
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        let tag = self.style(severity).apply_to(severity);
        match severity {
            Severity::Error => eprintln!("{tag}: {message}"),
            _ => println!("{tag}: {message}"),
        }
    }
}
