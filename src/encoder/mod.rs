//! The external sentence-encoder collaborator.
//!
//! The alignment core consumes embeddings as a black box: anything that can
//! turn a list of sentences in one language into fixed-dimension vectors
//! works. Production uses [`HttpEncoder`]; tests plug in an in-process mock.

mod http;

pub use http::HttpEncoder;

use std::future::Future;

use crate::error::AlignError;

/// Turns sentences into embedding vectors, one per sentence, all of the
/// same dimension.
pub trait SentenceEncoder {
    fn embed(
        &self,
        sentences: &[String],
        language: &str,
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, AlignError>> + Send;
}
