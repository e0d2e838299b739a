//! Context assembly and degraded-mode coaching pipeline.
//!
//! The request-scoped pipeline at the heart of Ninety:
//!
//! 1. **Snapshot** — a bounded, consent-gated textual summary of the
//!    learner profile ([`snapshot`])
//! 2. **Composition** — persona, snapshot, exercise metadata, and prompt
//!    merged into a fixed-order message sequence ([`compose`])
//! 3. **Invocation** — one completion call, or a stub reply when no
//!    provider is configured ([`pipeline`])
//!
//! Nothing here holds state across requests; every value is created when a
//! request arrives and dropped when the envelope is written.

pub mod compose;
pub mod persona;
pub mod pipeline;
pub mod snapshot;

pub use compose::compose_messages;
pub use persona::COACH_PERSONA;
pub use pipeline::CoachPipeline;
pub use snapshot::{ContextSnapshot, Segment};
