use crate::embedder::Embedder;
use crate::vector_db::{Distance, Point, VectorDb};
use anyhow::Result;

const COLLECTION: &str = "docs";

/// Ties an embedder to the vector store: indexes document chunks once, then
/// answers similarity queries with the chunk texts.
pub struct Retriever<E: Embedder> {
    embedder: E,
    vector_db: VectorDb,
}

impl<E: Embedder> Retriever<E> {
    pub fn new(embedder: E) -> Self {
        Retriever {
            embedder,
            vector_db: VectorDb::new(),
        }
    }

    /// Recreates the collection and stores one record per chunk, with the
    /// chunk text as payload. Safe to run again; the old records are dropped.
    pub fn index(&mut self, chunks: &[String]) -> Result<()> {
        self.vector_db
            .create_collection(COLLECTION, self.embedder.dimension(), Distance::Cosine);

        if chunks.is_empty() {
            return Ok(());
        }

        let embeddings = self.embedder.embed_batch(chunks)?;
        let points = embeddings
            .into_iter()
            .zip(chunks)
            .map(|(vector, chunk)| Point::new(vector, chunk.clone()))
            .collect();
        self.vector_db.upsert(COLLECTION, points)
    }

    /// Embeds the question and returns the texts of the `top_k` closest
    /// chunks, best match first. Empty when nothing is indexed.
    pub fn retrieve(&mut self, question: &str, top_k: usize) -> Result<Vec<String>> {
        let query = self.embedder.embed(question)?;
        let hits = self.vector_db.search(COLLECTION, &query, top_k)?;
        Ok(hits.into_iter().map(|hit| hit.payload).collect())
    }

    pub fn indexed_count(&self) -> Result<usize> {
        self.vector_db.count(COLLECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::stub::StubEmbedder;

    fn chunks() -> Vec<String> {
        vec![
            "The sky is blue.".to_string(),
            "Grass is green.".to_string(),
            "Water is wet.".to_string(),
        ]
    }

    #[test]
    fn test_index_stores_one_record_per_chunk() -> Result<()> {
        let mut retriever = Retriever::new(StubEmbedder);
        retriever.index(&chunks())?;
        assert_eq!(retriever.indexed_count()?, 3);
        Ok(())
    }

    #[test]
    fn test_reindex_keeps_count_stable() -> Result<()> {
        let mut retriever = Retriever::new(StubEmbedder);
        retriever.index(&chunks())?;
        retriever.index(&chunks())?;
        assert_eq!(retriever.indexed_count()?, 3);
        Ok(())
    }

    #[test]
    fn test_retrieve_returns_exact_chunk_first() -> Result<()> {
        let mut retriever = Retriever::new(StubEmbedder);
        retriever.index(&chunks())?;

        let results = retriever.retrieve("The sky is blue.", 3)?;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], "The sky is blue.");
        Ok(())
    }

    #[test]
    fn test_retrieve_on_empty_index() -> Result<()> {
        let mut retriever = Retriever::new(StubEmbedder);
        retriever.index(&[])?;
        assert!(retriever.retrieve("anything", 3)?.is_empty());
        Ok(())
    }
}
