//! Terminal output for CLI commands.
//!
//! Progress and diagnostics are styled and written to stderr. Command
//! results (route lists, JSON) are written plain to stdout so they can be
//! piped.

use console::{Style, Term};

pub(crate) struct Output {
    stderr: Term,
    stdout: Term,
    heading: Style,
    done: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stderr: Term::stderr(),
            stdout: Term::stdout(),
            heading: Style::new().cyan().bold(),
            done: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
        }
    }

    /// Command result line.
    pub(crate) fn result(&self, line: &str) {
        let _ = self.stdout.write_line(line);
    }

    pub(crate) fn heading(&self, msg: &str) {
        self.status(&self.heading, msg);
    }

    /// Unstyled progress line.
    pub(crate) fn progress(&self, msg: &str) {
        let _ = self.stderr.write_line(msg);
    }

    pub(crate) fn done(&self, msg: &str) {
        self.status(&self.done, msg);
    }

    pub(crate) fn warn(&self, msg: &str) {
        self.status(&self.warn, msg);
    }

    pub(crate) fn fail(&self, msg: &str) {
        self.status(&self.fail, msg);
    }

    fn status(&self, style: &Style, msg: &str) {
        let _ = self.stderr.write_line(&style.apply_to(msg).to_string());
    }
}
