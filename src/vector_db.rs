use anyhow::{Result, bail};
use ndarray::Array1;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Cosine,
}

/// One stored record: a generated id, the embedding vector, and the
/// original chunk text as payload.
#[derive(Debug, Clone)]
pub struct Point {
    pub id: String,
    pub vector: Array1<f32>,
    pub payload: String,
}

impl Point {
    pub fn new(vector: Array1<f32>, payload: String) -> Self {
        Point {
            id: uuid::Uuid::new_v4().to_string(),
            vector,
            payload,
        }
    }
}

/// A search hit, ordered by ascending distance to the query vector.
#[derive(Debug, Clone)]
pub struct ScoredPoint {
    pub id: String,
    pub payload: String,
    pub distance: f32,
}

struct Collection {
    dim: usize,
    distance: Distance,
    points: HashMap<String, Point>,
}

/// In-process vector store: named collections of points with a fixed
/// dimensionality, searched by exact linear scan.
pub struct VectorDb {
    collections: HashMap<String, Collection>,
}

impl VectorDb {
    pub fn new() -> Self {
        VectorDb {
            collections: HashMap::new(),
        }
    }

    /// Creates a fresh empty collection. Any existing collection with the
    /// same name is dropped first, so state from a previous indexing pass
    /// never leaks in.
    pub fn create_collection(&mut self, name: &str, dim: usize, distance: Distance) {
        self.collections.insert(
            name.to_string(),
            Collection {
                dim,
                distance,
                points: HashMap::new(),
            },
        );
    }

    /// Inserts or replaces points keyed by id. Every vector must match the
    /// collection's declared dimensionality; on a mismatch nothing from the
    /// batch is applied.
    pub fn upsert(&mut self, name: &str, points: Vec<Point>) -> Result<()> {
        let collection = match self.collections.get_mut(name) {
            Some(c) => c,
            None => bail!("collection '{}' does not exist", name),
        };

        for point in &points {
            if point.vector.len() != collection.dim {
                bail!(
                    "vector dimension {} does not match collection dimension {}",
                    point.vector.len(),
                    collection.dim
                );
            }
        }

        for point in points {
            collection.points.insert(point.id.clone(), point);
        }
        Ok(())
    }

    /// Returns up to `top_k` points ordered by ascending distance to the
    /// query vector. An empty collection yields an empty result, which is a
    /// normal outcome rather than an error.
    pub fn search(&self, name: &str, query: &Array1<f32>, top_k: usize) -> Result<Vec<ScoredPoint>> {
        let collection = match self.collections.get(name) {
            Some(c) => c,
            None => bail!("collection '{}' does not exist", name),
        };
        if query.len() != collection.dim {
            bail!(
                "query dimension {} does not match collection dimension {}",
                query.len(),
                collection.dim
            );
        }

        let mut scored: Vec<ScoredPoint> = collection
            .points
            .values()
            .map(|point| {
                let distance = match collection.distance {
                    Distance::Cosine => 1.0 - cosine_similarity(&point.vector, query),
                };
                ScoredPoint {
                    id: point.id.clone(),
                    payload: point.payload.clone(),
                    distance,
                }
            })
            .collect();

        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(top_k);
        Ok(scored)
    }

    /// Number of points stored in a collection.
    pub fn count(&self, name: &str) -> Result<usize> {
        match self.collections.get(name) {
            Some(c) => Ok(c.points.len()),
            None => bail!("collection '{}' does not exist", name),
        }
    }
}

fn cosine_similarity(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    let dot_product = a.dot(b);
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
