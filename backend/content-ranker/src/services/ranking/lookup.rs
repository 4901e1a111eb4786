use ndarray::Array1;
use std::collections::HashMap;

/// Request-scoped content id -> embedding map.
///
/// Iteration follows first-insertion order. Re-inserting an id replaces its
/// embedding but keeps the creation timestamp seen first.
#[derive(Debug, Default)]
pub struct EmbeddingLookup {
    entries: Vec<LookupEntry>,
    positions: HashMap<String, usize>,
}

#[derive(Debug)]
pub struct LookupEntry {
    pub content_id: String,
    pub embedding: Array1<f32>,
    pub created_at: Option<String>,
}

impl EmbeddingLookup {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, content_id: &str, embedding: Array1<f32>, created_at: Option<String>) {
        match self.positions.get(content_id) {
            Some(&position) => {
                self.entries[position].embedding = embedding;
            }
            None => {
                self.positions
                    .insert(content_id.to_string(), self.entries.len());
                self.entries.push(LookupEntry {
                    content_id: content_id.to_string(),
                    embedding,
                    created_at,
                });
            }
        }
    }

    pub fn get(&self, content_id: &str) -> Option<&Array1<f32>> {
        self.positions
            .get(content_id)
            .map(|&position| &self.entries[position].embedding)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LookupEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
