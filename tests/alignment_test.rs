//! Integration tests for the alignment pipeline.
//!
//! These tests exercise the full embed-and-mine flow without requiring a
//! running encoder service: a deterministic in-process mock stands in for
//! the HTTP encoder.

use std::collections::HashMap;

use bitext_align::align::{align, AlignedPair};
use bitext_align::config::SearchConfig;
use bitext_align::encoder::SentenceEncoder;
use bitext_align::error::AlignError;

/// Maps every known sentence to a fixed vector; unknown sentences embed to
/// a far-away direction so they never match anything by accident.
struct MockEncoder {
    table: HashMap<String, Vec<f32>>,
    dim: usize,
}

impl MockEncoder {
    fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        let dim = entries.first().map(|(_, v)| v.len()).unwrap_or(4);
        let table = entries
            .iter()
            .map(|(s, v)| (s.to_string(), v.clone()))
            .collect();
        Self { table, dim }
    }
}

impl SentenceEncoder for MockEncoder {
    async fn embed(
        &self,
        sentences: &[String],
        _language: &str,
    ) -> Result<Vec<Vec<f32>>, AlignError> {
        Ok(sentences
            .iter()
            .map(|s| {
                self.table
                    .get(s)
                    .cloned()
                    .unwrap_or_else(|| vec![0.0; self.dim])
            })
            .collect())
    }
}

/// Always fails, standing in for an unreachable encoder service.
struct FailingEncoder;

impl SentenceEncoder for FailingEncoder {
    async fn embed(
        &self,
        _sentences: &[String],
        _language: &str,
    ) -> Result<Vec<Vec<f32>>, AlignError> {
        Err(AlignError::EncoderFailure(
            "connection refused".to_string(),
        ))
    }
}

/// Returns one embedding regardless of how many sentences were sent.
struct MiscountingEncoder;

impl SentenceEncoder for MiscountingEncoder {
    async fn embed(
        &self,
        _sentences: &[String],
        _language: &str,
    ) -> Result<Vec<Vec<f32>>, AlignError> {
        Ok(vec![vec![1.0, 0.0, 0.0]])
    }
}

fn sentences(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn search_config() -> SearchConfig {
    SearchConfig {
        memory_budget_bytes: usize::MAX,
        max_neighbors: 4,
        parallel: false,
    }
}

/// A bilingual encoder fixture where translations share a direction.
fn zh_en_encoder() -> MockEncoder {
    MockEncoder::new(&[
        ("这是一只猫。", vec![1.0, 0.1, 0.0, 0.0]),
        ("This is a cat.", vec![0.95, 0.05, 0.1, 0.0]),
        ("他在弹钢琴。", vec![0.0, 0.1, 1.0, 0.2]),
        ("He is playing the piano.", vec![0.05, 0.0, 0.9, 0.25]),
    ])
}

#[tokio::test]
async fn test_end_to_end_two_mutual_pairs() {
    let encoder = zh_en_encoder();
    let src = sentences(&["这是一只猫。", "他在弹钢琴。"]);
    let trg = sentences(&["This is a cat.", "He is playing the piano."]);

    let result = align(&src, "zh", &trg, "en", &encoder, &search_config())
        .await
        .unwrap();

    // Exactly two matched pairs, no unmatched tail.
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|p| p.score > 0.0));
    assert!(result[0].score >= result[1].score);

    let mut pairs: Vec<(usize, usize)> = result
        .iter()
        .map(|p| (p.src.unwrap(), p.trg.unwrap()))
        .collect();
    pairs.sort();
    assert_eq!(pairs, vec![(0, 0), (1, 1)]);
}

#[tokio::test]
async fn test_crossed_sentence_order_still_pairs_translations() {
    let encoder = zh_en_encoder();
    // Target side in the opposite order from the source side.
    let src = sentences(&["这是一只猫。", "他在弹钢琴。"]);
    let trg = sentences(&["He is playing the piano.", "This is a cat."]);

    let result = align(&src, "zh", &trg, "en", &encoder, &search_config())
        .await
        .unwrap();

    let mut pairs: Vec<(usize, usize)> = result
        .iter()
        .map(|p| (p.src.unwrap(), p.trg.unwrap()))
        .collect();
    pairs.sort();
    assert_eq!(pairs, vec![(0, 1), (1, 0)]);
}

#[tokio::test]
async fn test_surplus_sources_become_unmatched_tail() {
    let encoder = MockEncoder::new(&[
        ("猫", vec![1.0, 0.0, 0.0]),
        ("cat", vec![0.9, 0.1, 0.0]),
        ("狗", vec![0.0, 1.0, 0.0]),
        ("钢琴", vec![0.0, 0.0, 1.0]),
    ]);
    let src = sentences(&["狗", "猫", "钢琴"]);
    let trg = sentences(&["cat"]);

    let result = align(&src, "zh", &trg, "en", &encoder, &search_config())
        .await
        .unwrap();

    assert_eq!(result.len(), 3);
    // The single target pairs with its translation.
    assert_eq!(result[0].src, Some(1));
    assert_eq!(result[0].trg, Some(0));
    assert!(result[0].score > 0.0);
    // Remaining sources trail with score 0, ascending by index.
    assert_eq!(
        result[1],
        AlignedPair {
            src: Some(0),
            trg: None,
            score: 0.0
        }
    );
    assert_eq!(
        result[2],
        AlignedPair {
            src: Some(2),
            trg: None,
            score: 0.0
        }
    );
}

#[tokio::test]
async fn test_every_index_covered_exactly_once() {
    let encoder = zh_en_encoder();
    let src = sentences(&["这是一只猫。", "他在弹钢琴。", "未知的句子"]);
    let trg = sentences(&["This is a cat.", "He is playing the piano."]);

    let result = align(&src, "zh", &trg, "en", &encoder, &search_config())
        .await
        .unwrap();

    let mut src_counts = vec![0usize; src.len()];
    let mut trg_counts = vec![0usize; trg.len()];
    for pair in &result {
        if let Some(s) = pair.src {
            src_counts[s] += 1;
        }
        if let Some(t) = pair.trg {
            trg_counts[t] += 1;
        }
    }
    assert!(src_counts.iter().all(|&c| c == 1), "{src_counts:?}");
    assert!(trg_counts.iter().all(|&c| c == 1), "{trg_counts:?}");
}

#[tokio::test]
async fn test_sharded_search_gives_identical_alignment() {
    let encoder = zh_en_encoder();
    let src = sentences(&["这是一只猫。", "他在弹钢琴。"]);
    let trg = sentences(&["This is a cat.", "He is playing the piano."]);

    let sequential = align(&src, "zh", &trg, "en", &encoder, &search_config())
        .await
        .unwrap();
    let sharded = align(
        &src,
        "zh",
        &trg,
        "en",
        &encoder,
        &SearchConfig {
            // One 4-dimension row per block: every merge path is exercised.
            memory_budget_bytes: 4 * std::mem::size_of::<f32>(),
            max_neighbors: 4,
            parallel: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(sequential, sharded);
}

#[tokio::test]
async fn test_empty_source_rejected() {
    let encoder = zh_en_encoder();
    let err = align(
        &[],
        "zh",
        &sentences(&["This is a cat."]),
        "en",
        &encoder,
        &search_config(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AlignError::InvalidInput(_)));
}

#[tokio::test]
async fn test_empty_target_rejected() {
    let encoder = zh_en_encoder();
    let err = align(
        &sentences(&["这是一只猫。"]),
        "zh",
        &[],
        "en",
        &encoder,
        &search_config(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AlignError::InvalidInput(_)));
}

#[tokio::test]
async fn test_encoder_failure_passes_through() {
    let err = align(
        &sentences(&["这是一只猫。"]),
        "zh",
        &sentences(&["This is a cat."]),
        "en",
        &FailingEncoder,
        &search_config(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AlignError::EncoderFailure(_)));
}

#[tokio::test]
async fn test_encoder_miscount_rejected() {
    let err = align(
        &sentences(&["一", "二"]),
        "zh",
        &sentences(&["one", "two"]),
        "en",
        &MiscountingEncoder,
        &search_config(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AlignError::InvalidInput(_)));
}
