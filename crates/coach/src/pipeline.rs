//! The coaching pipeline — completion invocation with graceful degradation.
//!
//! One pipeline per process, one upstream call per request at most:
//!
//! - No provider configured → fixed stub reply, zero network activity.
//! - Provider configured → exactly one completion call; an empty upstream
//!   reply is substituted with a fixed fallback, and any upstream failure
//!   is logged server-side and mapped to a generic envelope error.
//!
//! No retries, no caching, no circuit breaker — by contract those belong
//! to a surrounding collaborator.

use crate::compose::compose_messages;
use crate::snapshot::ContextSnapshot;
use ninety_core::envelope::CoachReply;
use ninety_core::provider::{CompletionProvider, CompletionRequest};
use ninety_core::request::CoachRequest;
use std::sync::Arc;
use tracing::{debug, error};

/// Reply used when no provider credential is configured.
const STUB_REPLY: &str = "Coaching is unavailable until a model API key is \
configured — ask your program administrator to set one. In the meantime, one \
step that always pays off: book 30-minute listening conversations with each \
of your key stakeholders this week, and only listen.";

/// Substituted when the model returns an empty reply.
const EMPTY_REPLY_FALLBACK: &str =
    "I could not generate a response right now. Please try again.";

/// The only error text that ever reaches a caller for upstream failures.
const UPSTREAM_ERROR_MESSAGE: &str = "Coach service failed to respond.";

/// Request-scoped coaching pipeline with injected provider configuration.
///
/// The provider is built once at process start and never mutated afterwards;
/// `respond` holds no state between calls.
pub struct CoachPipeline {
    provider: Option<Arc<dyn CompletionProvider>>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl CoachPipeline {
    /// Create a pipeline. `provider = None` selects degraded mode.
    pub fn new(
        provider: Option<Arc<dyn CompletionProvider>>,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens,
        }
    }

    /// Whether the pipeline will answer with stubs instead of live replies.
    pub fn is_degraded(&self) -> bool {
        self.provider.is_none()
    }

    /// Run one validated request through the pipeline.
    ///
    /// Every outcome becomes a `CoachReply`; this method never fails and
    /// never lets upstream detail reach the envelope.
    pub async fn respond(&self, request: &CoachRequest) -> CoachReply {
        let Some(provider) = &self.provider else {
            // Short-circuit before any context work touches the network path.
            return CoachReply::stub(STUB_REPLY);
        };

        let snapshot = ContextSnapshot::build(&request.profile);
        let messages = compose_messages(&snapshot, &request.meta, &request.prompt);

        let completion = CompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
        };

        match provider.complete(completion).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        model = %response.model,
                        "Completion succeeded"
                    );
                }

                let reply = response.message.content.trim();
                if reply.is_empty() {
                    CoachReply::live(EMPTY_REPLY_FALLBACK)
                } else {
                    CoachReply::live(reply)
                }
            }
            Err(e) => {
                // Full diagnostic detail stays server-side.
                error!(provider = %provider.name(), error = %e, "Completion request failed");
                CoachReply::failure(UPSTREAM_ERROR_MESSAGE)
            }
        }
    }
}
