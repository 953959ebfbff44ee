//! Text-to-vector encoder seam.
//!
//! The router only depends on the [`Encoder`] trait; the concrete model is an
//! external collaborator. The default implementation uses fastembed behind the
//! `local-embeddings` feature.

use crate::types::Result;
use async_trait::async_trait;

/// fastembed-backed local encoder.
#[cfg(feature = "local-embeddings")]
pub mod local;

#[cfg(feature = "local-embeddings")]
pub use local::FastEmbedEncoder;

/// Turns an arbitrary text string into a fixed-length numeric vector.
///
/// Implementations must be deterministic for equal input: utterance vectors
/// are computed once and reused for the process lifetime, and classification
/// determinism depends on it.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Encode one text into a fixed-length vector.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Encoding`](crate::types::AppError::Encoding) when
    /// the underlying model fails.
    async fn encode(&self, text: &str) -> Result<Vec<f32>>;
}
