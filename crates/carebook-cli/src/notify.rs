/// Short, non-blocking confirmations for the person at the terminal.
pub trait Notifier {
    fn success(&self, message: &str);
}

/// Writes to stderr so stdout stays parseable; silent in `--json` mode.
pub struct StderrNotifier {
    pub quiet: bool,
}

impl Notifier for StderrNotifier {
    fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}
