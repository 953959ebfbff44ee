//! Completion engine seam and implementations.
//!
//! The engine is an external collaborator: given a worker persona, a composed
//! task description, and an ordered capability list, it iteratively decides
//! which capability to invoke and with what query, then synthesizes the final
//! text answer. The core depends only on this input/output contract and its
//! failure mode, never on the engine's internal loop.

/// OpenAI-compatible engine implementation.
#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAiEngine;

use crate::tools::Capability;
use crate::types::Result;
use crate::workers::WorkerProfile;
use async_trait::async_trait;

/// Runs one worker to completion on one task.
#[async_trait]
pub trait CompletionEngine: Send + Sync {
    /// Produce the final text answer for a composed task description.
    ///
    /// `capabilities` is the ordered list the worker is bound to; the engine
    /// must not invoke anything outside it.
    ///
    /// # Errors
    ///
    /// [`AppError::Completion`](crate::types::AppError::Completion) when the
    /// engine itself fails.
    async fn run(
        &self,
        profile: &WorkerProfile,
        task_description: &str,
        capabilities: &[Capability],
    ) -> Result<String>;
}
