//! The single stable response shape for every outcome.
//!
//! Every terminal state of the pipeline — live reply, degraded stub,
//! validation failure, upstream failure — maps onto `CoachReply`. The
//! constructors are the only way to build one, which keeps the invariant
//! (`ok == false` implies `reply` absent and `error` present) intact.

use serde::{Deserialize, Serialize};

/// Which path produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    /// The external model generated the reply.
    Openai,
    /// Degraded mode — no network call occurred.
    Stub,
    /// Validation or upstream failure.
    Error,
}

/// The outbound response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachReply {
    pub ok: bool,

    pub mode: ReplyMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CoachReply {
    /// A successful reply generated by the external model.
    pub fn live(reply: impl Into<String>) -> Self {
        Self {
            ok: true,
            mode: ReplyMode::Openai,
            reply: Some(reply.into()),
            error: None,
        }
    }

    /// A degraded-mode reply produced without contacting the model.
    pub fn stub(reply: impl Into<String>) -> Self {
        Self {
            ok: true,
            mode: ReplyMode::Stub,
            reply: Some(reply.into()),
            error: None,
        }
    }

    /// A failure envelope. The message must already be caller-safe —
    /// upstream diagnostic detail never belongs here.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            mode: ReplyMode::Error,
            reply: None,
            error: Some(error.into()),
        }
    }
}
