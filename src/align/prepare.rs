use std::collections::BTreeMap;

use crate::error::AlignError;

/// Compact an embedding set to one row per distinct sentence index.
///
/// `indices` may contain duplicates and need not be ordered (the same
/// sentence can appear at several positions). The output is ordered by
/// increasing index value; when an index repeats, the embedding of its last
/// occurrence wins. Returns the compacted rows together with the sorted
/// distinct index values so callers can map row positions back to sentence
/// indices.
pub fn unique_embeddings(
    mut embeddings: Vec<Vec<f32>>,
    indices: &[usize],
) -> Result<(Vec<Vec<f32>>, Vec<usize>), AlignError> {
    if embeddings.is_empty() {
        return Err(AlignError::InvalidInput("empty embedding set".to_string()));
    }
    if embeddings.len() != indices.len() {
        return Err(AlignError::InvalidInput(format!(
            "{} embeddings for {} sentence indices",
            embeddings.len(),
            indices.len()
        )));
    }
    let dim = embeddings[0].len();
    if dim == 0 {
        return Err(AlignError::InvalidInput(
            "zero-dimension embeddings".to_string(),
        ));
    }
    if let Some(pos) = embeddings.iter().position(|row| row.len() != dim) {
        return Err(AlignError::InvalidInput(format!(
            "embedding row {pos} has dimension {}, expected {dim}",
            embeddings[pos].len()
        )));
    }

    // Index value -> position of its last occurrence in the input.
    let mut last: BTreeMap<usize, usize> = BTreeMap::new();
    for (pos, &index) in indices.iter().enumerate() {
        last.insert(index, pos);
    }

    let mut rows = Vec::with_capacity(last.len());
    let mut ids = Vec::with_capacity(last.len());
    for (&index, &pos) in &last {
        rows.push(std::mem::take(&mut embeddings[pos]));
        ids.push(index);
    }
    Ok((rows, ids))
}

/// Normalize every row to unit L2 norm in place, so that inner product
/// equals cosine similarity downstream.
///
/// A zero-norm row is left unchanged and its position reported back; the
/// caller treats such rows as unmatchable rather than dividing by zero.
/// Rows containing a non-finite component cannot be contained that way and
/// raise [`AlignError::DegenerateVector`].
pub fn normalize_l2(rows: &mut [Vec<f32>]) -> Result<Vec<usize>, AlignError> {
    let mut degenerate = Vec::new();
    for (row_index, row) in rows.iter_mut().enumerate() {
        if row.iter().any(|v| !v.is_finite()) {
            return Err(AlignError::DegenerateVector { row: row_index });
        }
        let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm == 0.0 {
            degenerate.push(row_index);
            continue;
        }
        for v in row.iter_mut() {
            *v /= norm;
        }
    }
    Ok(degenerate)
}
