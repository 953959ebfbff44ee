//! # courtside
//!
//! Intent classification and dispatch core for free-text NBA research
//! requests. A request is classified against a fixed intent taxonomy by
//! embedding similarity, resolved to a specialized worker profile, composed
//! into a single bounded task, and run to completion by a pluggable engine.
//!
//! ## Pipeline
//!
//! request → [`Router`] (via [`Encoder`] + [`RouteRegistry`]) → route name →
//! [`WorkerRegistry`] → [`Dispatcher`] → task execution → result string
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courtside::embedding::FastEmbedEncoder;
//! use courtside::llm::OpenAiEngine;
//! use courtside::{CapabilitySet, Dispatcher, RouteRegistry, Router, WorkerRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> courtside::Result<()> {
//!     let encoder = Arc::new(FastEmbedEncoder::new("BAAI/bge-small-en-v1.5")?);
//!     let router = Router::new(encoder, &RouteRegistry::nba_default(), 0.72).await?;
//!     let engine = Arc::new(OpenAiEngine::new(
//!         "test".to_string(),
//!         "http://127.0.0.1:5000/v1".to_string(),
//!         "gpt-4o-mini".to_string(),
//!     ));
//!     let dispatcher = Dispatcher::new(
//!         router,
//!         WorkerRegistry::nba_default(),
//!         engine,
//!         CapabilitySet::new()?,
//!     )?;
//!
//!     let answer = dispatcher
//!         .research("Who is leading in NBA player stats this season?")
//!         .await?;
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! The registries and the primed router are immutable once built; a
//! [`Dispatcher`] serves independent requests concurrently without locking.
//! Initialization (registration plus utterance embedding) completes before
//! the first request is accepted. The core imposes no internal timeout: wrap
//! [`Dispatcher::dispatch`] in a caller-side deadline to bound execution.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `openai` | OpenAI-compatible completion engine (default) |
//! | `local-embeddings` | fastembed ONNX encoder (not on Windows MSVC) |

#![warn(missing_docs)]

/// Dispatching: request validation, task composition, and execution.
pub mod dispatch;
/// Text-to-vector encoder seam and implementations.
pub mod embedding;
/// Completion engine seam and implementations.
pub mod llm;
/// Semantic routing over the intent taxonomy.
pub mod routing;
/// Worker capabilities (web search, site query, NBA data fetch).
pub mod tools;
/// Core types and error handling.
pub mod types;
/// Configuration utilities.
pub mod utils;
/// Worker profiles and the route-to-worker registry.
pub mod workers;

// Re-export commonly used types
pub use dispatch::{Dispatcher, Task};
pub use embedding::Encoder;
pub use llm::CompletionEngine;
pub use routing::{Route, RouteRegistry, Router};
pub use tools::{Capability, CapabilitySet};
pub use types::{
    AppError, CapabilityDescriptor, CapabilityKind, ExecutionResult, NbaDataset, Result,
    RouteMatch,
};
pub use workers::{WorkerProfile, WorkerRegistry};
