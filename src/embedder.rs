use anyhow::{Result, anyhow};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use ndarray::Array1;
use std::path::PathBuf;

/// Output size of all-MiniLM-L6-v2.
const MODEL_DIM: usize = 384;

/// Turns text into fixed-length vectors. The production implementation wraps
/// a pretrained sentence-embedding model; tests substitute a stub.
pub trait Embedder {
    fn dimension(&self) -> usize;

    /// One vector per input string, in matching order.
    fn embed_batch(&mut self, texts: &[String]) -> Result<Vec<Array1<f32>>>;

    fn embed(&mut self, text: &str) -> Result<Array1<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        vectors
            .pop()
            .ok_or_else(|| anyhow!("embedding model returned no vector"))
    }
}

/// Sentence embeddings from the all-MiniLM-L6-v2 model, downloaded on first
/// use and cached under the user cache directory.
pub struct FastEmbedder {
    model: TextEmbedding,
}

impl FastEmbedder {
    pub fn new() -> Result<Self> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(Self::model_cache_dir()?)
                .with_show_download_progress(true),
        )?;
        Ok(FastEmbedder { model })
    }

    fn model_cache_dir() -> Result<PathBuf> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| anyhow!("Could not determine cache directory"))?
            .join("askdocs")
            .join("models");
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

impl Embedder for FastEmbedder {
    fn dimension(&self) -> usize {
        MODEL_DIM
    }

    fn embed_batch(&mut self, texts: &[String]) -> Result<Vec<Array1<f32>>> {
        let embeddings = self.model.embed(texts.to_vec(), None)?;
        Ok(embeddings.into_iter().map(Array1::from).collect())
    }
}
