//! Blocking operator dialogs used by the mutation rules.

use async_trait::async_trait;

/// Confirmation, prompt and alert capability injected into the views.
///
/// Every call blocks the view until the operator answers.
#[async_trait]
pub trait Dialogs: Send {
    /// Yes/no question. `false` on a negative or cancelled answer.
    async fn confirm(&mut self, message: &str) -> bool;

    /// Free-text question pre-filled with `default`. `None` when cancelled.
    async fn prompt(&mut self, message: &str, default: &str) -> Option<String>;

    /// Notification the operator has to acknowledge.
    async fn alert(&mut self, message: &str);
}
