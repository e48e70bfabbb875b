use rayon::prelude::*;

use crate::config::SearchConfig;
use crate::error::AlignError;

/// Per-query neighbor lists: similarities sorted descending and the matching
/// reference indices, `min(k, |reference|)` entries per row.
pub type NeighborLists = (Vec<Vec<f32>>, Vec<Vec<usize>>);

pub(crate) fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Exact inner-product index over a borrowed slice of reference rows.
///
/// Search is a full scan: score everything, sort, truncate. No
/// approximation.
struct FlatIndex<'a> {
    rows: &'a [Vec<f32>],
}

impl<'a> FlatIndex<'a> {
    fn new(rows: &'a [Vec<f32>]) -> Self {
        Self { rows }
    }

    /// Top-k rows by inner product with `query`, similarity descending.
    /// Similarity ties break by ascending row index so repeated runs and
    /// different shardings agree exactly.
    fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, dot(query, row)))
            .collect();
        scored.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);
        scored
    }
}

/// Compute, for every row of `x`, the top-k most similar rows of `y` by
/// inner product, exactly.
///
/// `k` is clamped to `|y|`. With `config.parallel` off this is one flat
/// pass over the whole reference set; with it on, the search is sharded
/// into blocks sized by the memory budget and the per-block scan fans out
/// across CPU cores. Both modes return identical results.
pub fn knn(
    x: &[Vec<f32>],
    y: &[Vec<f32>],
    k: usize,
    config: &SearchConfig,
) -> Result<NeighborLists, AlignError> {
    if x.is_empty() {
        return Err(AlignError::InvalidInput("empty query set".to_string()));
    }
    if y.is_empty() {
        return Err(AlignError::InvalidInput("empty reference set".to_string()));
    }
    if k == 0 {
        return Err(AlignError::InvalidInput(
            "neighbor count must be at least 1".to_string(),
        ));
    }
    let dim = x[0].len();
    if dim == 0 {
        return Err(AlignError::InvalidInput(
            "zero-dimension embeddings".to_string(),
        ));
    }
    if let Some(pos) = x.iter().position(|row| row.len() != dim) {
        return Err(AlignError::InvalidInput(format!(
            "query row {pos} has dimension {}, expected {dim}",
            x[pos].len()
        )));
    }
    if let Some(pos) = y.iter().position(|row| row.len() != dim) {
        return Err(AlignError::InvalidInput(format!(
            "reference row {pos} has dimension {}, expected {dim}",
            y[pos].len()
        )));
    }

    let k = k.min(y.len());
    if config.parallel {
        knn_sharded(x, y, k, config.memory_budget_bytes)
    } else {
        knn_single_pass(x, y, k)
    }
}

/// One exact index over the whole reference set, queried row by row.
/// Correct whenever `y` comfortably fits the memory budget.
fn knn_single_pass(x: &[Vec<f32>], y: &[Vec<f32>], k: usize) -> Result<NeighborLists, AlignError> {
    let index = FlatIndex::new(y);
    let mut sims = Vec::with_capacity(x.len());
    let mut inds = Vec::with_capacity(x.len());
    for query in x {
        let top = index.search(query, k);
        sims.push(top.iter().map(|&(_, s)| s).collect());
        inds.push(top.iter().map(|&(i, _)| i).collect());
    }
    Ok((sims, inds))
}

/// Sharded search: contiguous row blocks of `x` against contiguous column
/// blocks of `y`, each block sized so its index fits the memory budget.
///
/// Per x-block, local top-k results from every y-block are concatenated and
/// re-sorted to select the global top-k. The re-sort is what makes sharding
/// exact: local winners of one block are not global winners. Indices are
/// offset by the block start so they address the full reference set.
fn knn_sharded(
    x: &[Vec<f32>],
    y: &[Vec<f32>],
    k: usize,
    memory_budget_bytes: usize,
) -> Result<NeighborLists, AlignError> {
    let dim = x[0].len();
    let block_rows = memory_budget_bytes / (dim * std::mem::size_of::<f32>());
    if block_rows == 0 {
        return Err(AlignError::ResourceExhausted(format!(
            "memory budget of {memory_budget_bytes} bytes cannot hold one {dim}-dimension vector"
        )));
    }

    let mut sims = vec![Vec::new(); x.len()];
    let mut inds = vec![Vec::new(); x.len()];

    for x_from in (0..x.len()).step_by(block_rows) {
        let x_to = (x_from + block_rows).min(x.len());
        let x_block = &x[x_from..x_to];
        let mut merged: Vec<Vec<(usize, f32)>> = vec![Vec::new(); x_block.len()];

        // The outer block iteration stays sequential; only the scan of one
        // block fans out across cores. One block index is alive at a time.
        for y_from in (0..y.len()).step_by(block_rows) {
            let y_to = (y_from + block_rows).min(y.len());
            let index = FlatIndex::new(&y[y_from..y_to]);
            let block_k = k.min(y_to - y_from);

            let local: Vec<Vec<(usize, f32)>> = x_block
                .par_iter()
                .map(|query| index.search(query, block_k))
                .collect();

            for (row, top) in local.into_iter().enumerate() {
                merged[row].extend(top.into_iter().map(|(i, s)| (i + y_from, s)));
            }
        }

        for (row, mut candidates) in merged.into_iter().enumerate() {
            candidates.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
            candidates.truncate(k);
            sims[x_from + row] = candidates.iter().map(|&(_, s)| s).collect();
            inds[x_from + row] = candidates.iter().map(|&(i, _)| i).collect();
        }
    }

    Ok((sims, inds))
}
