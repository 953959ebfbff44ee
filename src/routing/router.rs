//! Request classifier over the route taxonomy.
//!
//! Scores a request against every route's utterance vectors with cosine
//! similarity, taking the per-route maximum: a route matches when the request
//! resembles any of its known phrasings, not all of them.

use crate::embedding::Encoder;
use crate::routing::registry::RouteRegistry;
use crate::types::{AppError, Result, RouteMatch};
use std::sync::Arc;

/// One route with its utterance vectors precomputed.
#[derive(Debug, Clone)]
struct PrimedRoute {
    name: String,
    embeddings: Vec<Vec<f32>>,
}

/// Classifies a request string into exactly one route name, or declares no
/// confident match.
pub struct Router {
    encoder: Arc<dyn Encoder>,
    routes: Vec<PrimedRoute>,
    threshold: f32,
}

impl Router {
    /// Build a router, embedding every utterance exactly once.
    ///
    /// This is the one-time initialization barrier: once it returns, the
    /// primed route table is immutable and classification needs no locking.
    ///
    /// # Errors
    ///
    /// `Configuration` for an empty registry; encoder failures propagate.
    pub async fn new(
        encoder: Arc<dyn Encoder>,
        registry: &RouteRegistry,
        threshold: f32,
    ) -> Result<Self> {
        if registry.is_empty() {
            return Err(AppError::Configuration(
                "Route registry holds no routes".to_string(),
            ));
        }

        let mut routes = Vec::with_capacity(registry.len());
        for route in registry.routes() {
            let mut embeddings = Vec::with_capacity(route.utterances().len());
            for utterance in route.utterances() {
                embeddings.push(encoder.encode(utterance).await?);
            }
            routes.push(PrimedRoute {
                name: route.name().to_string(),
                embeddings,
            });
        }

        tracing::debug!(routes = routes.len(), threshold, "router primed");
        Ok(Self {
            encoder,
            routes,
            threshold,
        })
    }

    /// The configured minimum confidence threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Route names in registration order.
    pub fn route_names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.name.as_str())
    }

    /// Classify a request into a [`RouteMatch`].
    ///
    /// Returns `route: None` when the best score falls below the confidence
    /// threshold; this keeps off-domain queries out of unrelated workers.
    /// Deterministic for a deterministic encoder: score ties resolve to the
    /// earliest-registered route.
    pub async fn classify(&self, request: &str) -> Result<RouteMatch> {
        let request_vector = self.encoder.encode(request).await?;

        let mut best_route = "";
        let mut best_score = f32::MIN;
        for route in &self.routes {
            let score = route
                .embeddings
                .iter()
                .map(|utterance| cosine_similarity(&request_vector, utterance))
                .fold(f32::MIN, f32::max);

            // Strictly greater keeps the earliest-registered route on ties.
            if score > best_score {
                best_score = score;
                best_route = &route.name;
            }
        }

        let matched = best_score >= self.threshold;
        tracing::debug!(
            route = best_route,
            score = best_score,
            matched,
            "request classified"
        );

        Ok(RouteMatch {
            route: matched.then(|| best_route.to_string()),
            score: best_score,
        })
    }
}

/// Cosine similarity between two vectors.
///
/// Zero when either vector has zero magnitude or the dimensions differ.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
