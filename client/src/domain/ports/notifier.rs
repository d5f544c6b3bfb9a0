//! Driven port for user-facing notices.

/// Delivers messages to the user.
///
/// Workflows never print or raise dialogs themselves; they call a notifier so
/// the presentation layer decides how a notice is shown.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show an error the user has to acknowledge.
    fn notify_error(&self, message: &str);

    /// Confirm that an action completed.
    fn notify_success(&self, message: &str);
}
