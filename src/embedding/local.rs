//! fastembed-backed local encoder.

use crate::embedding::Encoder;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use parking_lot::Mutex;

/// Local ONNX embedding model via fastembed.
///
/// The model handle requires exclusive access for inference, so it sits
/// behind a mutex; encoding is CPU-bound and fast relative to the network
/// phases around it.
pub struct FastEmbedEncoder {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedEncoder {
    /// Load the embedding model, downloading it on first use.
    pub fn new(model_name: &str) -> Result<Self> {
        let model = TextEmbedding::try_new(
            InitOptions::new(select_model(model_name)).with_show_download_progress(true),
        )
        .map_err(|e| AppError::Encoding(e.to_string()))?;

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

fn select_model(model_name: &str) -> EmbeddingModel {
    match model_name {
        "BAAI/bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        _ => EmbeddingModel::BGESmallENV15,
    }
}

#[async_trait]
impl Encoder for FastEmbedEncoder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self
            .model
            .lock()
            .embed(vec![text], None)
            .map_err(|e| AppError::Encoding(e.to_string()))?;

        vectors
            .pop()
            .ok_or_else(|| AppError::Encoding("embedding model returned no vector".to_string()))
    }
}
