//! Embedding client and similarity scoring
//!
//! This module contains the two relevance-scoring building blocks:
//! - A client for the remote embedding API (text in, vector out)
//! - Cosine similarity between two vectors

mod client;
mod similarity;

pub use client::{EmbedRole, EmbeddingClient};
pub use similarity::cosine;
