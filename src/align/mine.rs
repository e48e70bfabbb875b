use crate::align::knn::knn;
use crate::align::margin::{score_candidates, RatioMargin};
use crate::align::prepare::{normalize_l2, unique_embeddings};
use crate::align::AlignedPair;
use crate::config::SearchConfig;
use crate::error::AlignError;

/// Mine a one-to-one alignment between two embedding sets.
///
/// Runs the neighbor search in both directions, scores every candidate with
/// the ratio margin (the query's own baseline plus the candidate's baseline
/// from the opposite direction), then greedily resolves the
/// `|src| + |trg|` direction-best candidates into a duplicate-free pairing.
/// Every distinct sentence index of both sides appears in exactly one output
/// pair: matched pairs first in descending score order, then leftover source
/// indices ascending, then leftover target indices ascending.
pub fn mine(
    src_embeddings: Vec<Vec<f32>>,
    src_indices: &[usize],
    trg_embeddings: Vec<Vec<f32>>,
    trg_indices: &[usize],
    config: &SearchConfig,
) -> Result<Vec<AlignedPair>, AlignError> {
    let (mut src, src_ids) = unique_embeddings(src_embeddings, src_indices)?;
    let (mut trg, trg_ids) = unique_embeddings(trg_embeddings, trg_indices)?;

    let src_degenerate = normalize_l2(&mut src)?;
    let trg_degenerate = normalize_l2(&mut trg)?;
    if !src_degenerate.is_empty() || !trg_degenerate.is_empty() {
        tracing::warn!(
            "{} source and {} target embeddings have zero norm; they will stay unmatched",
            src_degenerate.len(),
            trg_degenerate.len()
        );
    }

    if src[0].len() != trg[0].len() {
        return Err(AlignError::InvalidInput(format!(
            "source dimension {} does not match target dimension {}",
            src[0].len(),
            trg[0].len()
        )));
    }

    if config.max_neighbors == 0 {
        return Err(AlignError::InvalidInput(
            "max_neighbors must be at least 1".to_string(),
        ));
    }
    let k_fwd = config.max_neighbors.min(trg.len());
    let k_bwd = config.max_neighbors.min(src.len());

    // The two directions share no state; fan them out when parallel search
    // is enabled, otherwise run them back to back.
    let (fwd, bwd) = if config.parallel {
        rayon::join(
            || knn(&src, &trg, k_fwd, config),
            || knn(&trg, &src, k_bwd, config),
        )
    } else {
        (
            knn(&src, &trg, k_fwd, config),
            knn(&trg, &src, k_bwd, config),
        )
    };
    let (x2y_sim, x2y_ind) = fwd?;
    let (y2x_sim, y2x_ind) = bwd?;

    let x2y_mean = row_means(&x2y_sim);
    let y2x_mean = row_means(&y2x_sim);

    let margin = RatioMargin;
    let fwd_scores = score_candidates(&src, &trg, &x2y_ind, &x2y_mean, &y2x_mean, &margin)?;
    let bwd_scores = score_candidates(&trg, &src, &y2x_ind, &y2x_mean, &x2y_mean, &margin)?;

    // Direction-best candidates, enumerated source rows first then target
    // rows. On a score tie within a row the first candidate wins.
    let mut candidates: Vec<(usize, usize, f32)> = Vec::with_capacity(src.len() + trg.len());
    for (i, row) in fwd_scores.iter().enumerate() {
        let best = argmax(row);
        candidates.push((i, x2y_ind[i][best], row[best]));
    }
    for (j, row) in bwd_scores.iter().enumerate() {
        let best = argmax(row);
        candidates.push((y2x_ind[j][best], j, row[best]));
    }

    // Stable sort: equal scores keep the enumeration order above.
    candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut seen_src = vec![false; src.len()];
    let mut seen_trg = vec![false; trg.len()];
    let mut result = Vec::with_capacity(src.len().max(trg.len()));
    for &(s, t, score) in &candidates {
        // A non-positive (or NaN) score never claims its indices; both
        // sentences stay available for the unmatched tail.
        if seen_src[s] || seen_trg[t] || !(score > 0.0) {
            continue;
        }
        seen_src[s] = true;
        seen_trg[t] = true;
        result.push(AlignedPair {
            src: Some(src_ids[s]),
            trg: Some(trg_ids[t]),
            score,
        });
    }

    // Leftovers are appended after the matches, source side fully before the
    // target side, ascending by index. The list is not re-sorted afterwards.
    for (s, seen) in seen_src.iter().enumerate() {
        if !seen {
            result.push(AlignedPair {
                src: Some(src_ids[s]),
                trg: None,
                score: 0.0,
            });
        }
    }
    for (t, seen) in seen_trg.iter().enumerate() {
        if !seen {
            result.push(AlignedPair {
                src: None,
                trg: Some(trg_ids[t]),
                score: 0.0,
            });
        }
    }

    Ok(result)
}

fn row_means(rows: &[Vec<f32>]) -> Vec<f32> {
    rows.iter()
        .map(|row| row.iter().sum::<f32>() / row.len() as f32)
        .collect()
}

/// Position of the first maximum in `row`.
fn argmax(row: &[f32]) -> usize {
    let mut best = 0;
    for (i, &value) in row.iter().enumerate().skip(1) {
        if value > row[best] {
            best = i;
        }
    }
    best
}
