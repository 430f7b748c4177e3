//! The interaction workflow
//!
//! A strictly-ordered run: retrieve and summarize, ask the user whether
//! the suggestion helped, and conditionally escalate into a persisted
//! incident plus a support notification.

pub mod engine;
pub mod state;

pub use engine::{WorkflowEngine, WorkflowRunState};
pub use state::RunPhase;
