//! Blocking user interaction the screens need.

/// Alerts and confirmations raised by screen operations.
///
/// The terminal front-end answers on stdin; tests script the answers.
pub trait Prompt {
    /// Show a message the user must acknowledge
    fn alert(&self, message: &str);

    /// Ask a yes/no question
    fn confirm(&self, message: &str) -> bool;
}
