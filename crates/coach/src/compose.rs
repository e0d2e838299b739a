//! Message composition — fixed order, fixed roles.
//!
//! persona → context snapshot → exercise metadata (when present) → prompt.
//! The order is significant: the model reads policy first, context second,
//! and the learner's question last with no extra wrapping.

use crate::persona::COACH_PERSONA;
use crate::snapshot::ContextSnapshot;
use ninety_core::message::Message;
use serde_json::Value;

/// Compose the full message sequence for one completion call.
///
/// The metadata segment is only emitted when `meta` is non-empty, as a
/// single JSON block preserving the caller's key order.
pub fn compose_messages(
    snapshot: &ContextSnapshot,
    meta: &serde_json::Map<String, Value>,
    prompt: &str,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(4);

    messages.push(Message::system(COACH_PERSONA));

    messages.push(Message::system(format!(
        "Profile snapshot (for context):\n{}",
        snapshot.render()
    )));

    if !meta.is_empty() {
        messages.push(Message::system(format!(
            "Exercise context: {}",
            Value::Object(meta.clone())
        )));
    }

    messages.push(Message::user(prompt));

    messages
}
