//! The dispatcher: raw request in, completed research result out.
//!
//! A request moves through a fixed pipeline: validate, classify, resolve the
//! worker profile, compose the task description, execute a single bounded
//! worker to completion. No state is revisited and nothing is retried;
//! external-collaborator failures surface wrapped with the route context.
//!
//! The core imposes no internal timeout. Cancellation is the caller's
//! concern: wrap [`Dispatcher::dispatch`] in `tokio::time::timeout` (or
//! abort the future) to bound an in-flight execution.

use crate::llm::CompletionEngine;
use crate::routing::Router;
use crate::tools::CapabilitySet;
use crate::types::{AppError, ExecutionResult, Result};
use crate::workers::{WorkerProfile, WorkerRegistry};
use chrono::Utc;
use std::sync::Arc;

/// Quality directives appended to every composed task description.
const TASK_DIRECTIVES: &str = "Remember to use your available tools to gather new information, \
and base your analysis on current and factual data. Keep your answers concise and clear while \
including all the facts. You are researching for an upcoming game that will happen in the \
future.";

/// A composed, single-worker unit of execution.
///
/// Built fresh per request and never reused across requests.
#[derive(Debug, Clone)]
pub struct Task {
    /// The fully composed task description handed to the worker.
    pub description: String,
    /// The profile of the worker the task is assigned to.
    pub worker: WorkerProfile,
}

/// Turns a free-text request into a completed, natural-language result.
///
/// All collaborators are injected at construction; the dispatcher holds no
/// hidden process-wide state. The registries and the primed router are
/// immutable, so one dispatcher serves independent requests concurrently
/// without locking.
pub struct Dispatcher {
    router: Router,
    workers: WorkerRegistry,
    engine: Arc<dyn CompletionEngine>,
    capabilities: CapabilitySet,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("router", &self.router)
            .field("workers", &self.workers)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Build a dispatcher, validating that every registered route resolves to
    /// a worker profile.
    ///
    /// # Errors
    ///
    /// `UnknownRoute` when the static configuration is inconsistent; this
    /// fails before any request is accepted rather than mid-request.
    pub fn new(
        router: Router,
        workers: WorkerRegistry,
        engine: Arc<dyn CompletionEngine>,
        capabilities: CapabilitySet,
    ) -> Result<Self> {
        for name in router.route_names() {
            if !workers.has_profile(name) {
                return Err(AppError::UnknownRoute(name.to_string()));
            }
        }

        Ok(Self {
            router,
            workers,
            engine,
            capabilities,
        })
    }

    /// Run the full pipeline for one request.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for empty or whitespace-only input, before any
    ///   encoder or capability call.
    /// - `Unroutable` when no route clears the confidence threshold; carries
    ///   the best score so the caller can decide between rephrasing, a
    ///   fallback worker, or surfacing the failure.
    /// - `Execution` wrapping encoder, capability, or engine failures.
    pub async fn dispatch(&self, request: &str) -> Result<ExecutionResult> {
        if request.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Request is empty or whitespace-only".to_string(),
            ));
        }

        let matched = self.router.classify(request).await.map_err(|e| {
            AppError::Execution {
                context: "request classification".to_string(),
                source: Box::new(e),
            }
        })?;

        let route = match matched.route {
            Some(route) => route,
            None => {
                tracing::info!(score = matched.score, "no route cleared the threshold");
                return Err(AppError::Unroutable {
                    best_score: matched.score,
                    threshold: self.router.threshold(),
                });
            }
        };
        tracing::info!(route = %route, score = matched.score, "request classified");

        let profile = self.workers.resolve(&route)?;

        let date = Utc::now().format("%Y-%m-%d").to_string();
        let task = Task {
            description: compose_description(&profile.task_template, request, &date),
            worker: profile.clone(),
        };

        let capabilities = self.capabilities.for_kinds(&task.worker.capabilities);
        tracing::debug!(
            route = %route,
            capabilities = capabilities.len(),
            "executing single-worker task"
        );

        let text = self
            .engine
            .run(&task.worker, &task.description, &capabilities)
            .await
            .map_err(|e| AppError::Execution {
                context: format!("route '{}'", route),
                source: Box::new(e),
            })?;

        tracing::info!(route = %route, chars = text.len(), "task completed");
        Ok(ExecutionResult { text })
    }

    /// Single caller-facing operation: research a free-text request.
    pub async fn research(&self, request: &str) -> Result<String> {
        self.dispatch(request).await.map(|result| result.text)
    }
}

/// Compose the final task description: template, request, quality directives,
/// and the dispatch-time date. Date injection anchors the worker's temporal
/// reasoning and always uses the current wall clock, never a cached value.
fn compose_description(template: &str, request: &str, date: &str) -> String {
    format!(
        "{}: {}. {} Today's date is {}",
        template, request, TASK_DIRECTIVES, date
    )
}
