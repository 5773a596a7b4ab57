use std::io::Write;

use voice_notes_core::Notifier;

/// Shows recorder notices on stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "! {}", message);
    }
}
