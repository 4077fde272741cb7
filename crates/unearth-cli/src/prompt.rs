//! Interactive password prompt.

use console::Term;
use unearth_core::password::PasswordPrompt;
use unearth_core::scanner::ArchiveEntry;

/// Terminal-backed password prompt.
///
/// Reads the secret without echoing it. Outside a TTY it declines
/// immediately, which downgrades encrypted archives to skips instead of
/// hanging the run on a read that can never complete.
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl PasswordPrompt for TermPrompt {
    fn request_password(&mut self, entry: &ArchiveEntry) -> Option<String> {
        if !self.term.is_term() {
            return None;
        }

        let _ = self.term.write_str(&format!(
            "Password for {} (empty to skip): ",
            entry.file_name()
        ));
        match self.term.read_secure_line() {
            Ok(secret) if !secret.is_empty() => Some(secret),
            _ => None,
        }
    }
}
