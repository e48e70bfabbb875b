//! Alignment core: vector preparation, memory-bounded exact neighbor
//! search, margin scoring, and bidirectional greedy mining.

pub mod knn;
pub mod margin;
pub mod mine;
pub mod prepare;

use crate::config::SearchConfig;
use crate::encoder::SentenceEncoder;
use crate::error::AlignError;

/// One row of an alignment result.
///
/// A matched pair carries both sentence indices and a positive
/// margin-corrected score. An unmatched sentence carries its own index only
/// and a score of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub src: Option<usize>,
    pub trg: Option<usize>,
    pub score: f32,
}

/// Align two sentence lists: embed each side once with the encoder
/// collaborator, then mine the bidirectional one-to-one alignment.
///
/// Encoder failures pass through untouched and are never retried. Any
/// failure aborts the whole request; no partial alignment is returned.
pub async fn align<E: SentenceEncoder>(
    src_sentences: &[String],
    src_lang: &str,
    trg_sentences: &[String],
    trg_lang: &str,
    encoder: &E,
    config: &SearchConfig,
) -> Result<Vec<AlignedPair>, AlignError> {
    if src_sentences.is_empty() {
        return Err(AlignError::InvalidInput(
            "empty source sentence list".to_string(),
        ));
    }
    if trg_sentences.is_empty() {
        return Err(AlignError::InvalidInput(
            "empty target sentence list".to_string(),
        ));
    }

    let src_embeddings = encoder.embed(src_sentences, src_lang).await?;
    let trg_embeddings = encoder.embed(trg_sentences, trg_lang).await?;

    let src_indices: Vec<usize> = (0..src_sentences.len()).collect();
    let trg_indices: Vec<usize> = (0..trg_sentences.len()).collect();

    mine::mine(
        src_embeddings,
        &src_indices,
        trg_embeddings,
        &trg_indices,
        config,
    )
}
