/// Channel for user-visible notices.
///
/// The recorder only uses it when microphone permission is denied; capture
/// failures go to the log instead. Any `FnMut(&str)` closure is a notifier.
pub trait Notifier {
    /// Show `message` to the user.
    fn notify(&mut self, message: &str);
}

impl<F> Notifier for F
where
    F: FnMut(&str),
{
    fn notify(&mut self, message: &str) {
        self(message)
    }
}
