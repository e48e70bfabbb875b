use crate::align::knn::dot;
use crate::error::AlignError;

/// Strategy turning a raw similarity into a hubness-corrected score.
///
/// Embedding spaces have hub vectors that sit close to many others
/// regardless of true relatedness; relating the raw similarity to the local
/// neighborhood density of both endpoints cancels that advantage.
pub trait Margin {
    /// `query_mean` and `candidate_mean` are the mean top-k similarities of
    /// the query and the candidate in their respective search directions.
    fn score(&self, sim: f32, query_mean: f32, candidate_mean: f32) -> f32;
}

/// The default correction: raw similarity divided by the average of the two
/// local baselines.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioMargin;

impl Margin for RatioMargin {
    fn score(&self, sim: f32, query_mean: f32, candidate_mean: f32) -> f32 {
        sim / ((query_mean + candidate_mean) / 2.0)
    }
}

/// Apply `margin` to every (query, candidate) entry of a neighbor-list
/// matrix, recomputing the raw inner product per pair.
///
/// Pure: returns a matrix of corrected scores with the same shape as
/// `candidate_inds`. `query_means` must be per-row baselines of `x`,
/// `candidate_means` per-row baselines of `y` from the opposite search
/// direction.
pub fn score_candidates(
    x: &[Vec<f32>],
    y: &[Vec<f32>],
    candidate_inds: &[Vec<usize>],
    query_means: &[f32],
    candidate_means: &[f32],
    margin: &impl Margin,
) -> Result<Vec<Vec<f32>>, AlignError> {
    if candidate_inds.len() != x.len() {
        return Err(AlignError::InvalidInput(format!(
            "{} candidate rows for {} query vectors",
            candidate_inds.len(),
            x.len()
        )));
    }
    if query_means.len() != x.len() {
        return Err(AlignError::InvalidInput(format!(
            "{} query baselines for {} query vectors",
            query_means.len(),
            x.len()
        )));
    }
    if candidate_means.len() != y.len() {
        return Err(AlignError::InvalidInput(format!(
            "{} candidate baselines for {} reference vectors",
            candidate_means.len(),
            y.len()
        )));
    }

    let mut scores = Vec::with_capacity(candidate_inds.len());
    for (i, row) in candidate_inds.iter().enumerate() {
        let mut out = Vec::with_capacity(row.len());
        for &candidate in row {
            let Some(target) = y.get(candidate) else {
                return Err(AlignError::InvalidInput(format!(
                    "candidate index {candidate} out of range for {} reference vectors",
                    y.len()
                )));
            };
            out.push(margin.score(
                dot(&x[i], target),
                query_means[i],
                candidate_means[candidate],
            ));
        }
        scores.push(out);
    }
    Ok(scores)
}
