//! Small linear algebra and indexing helpers working on `ndarray` arrays.
use ndarray::{Array2, ArrayView2};

/// Determinant of a 3x3 matrix
pub fn determinant(matrix: ArrayView2<'_, f64>) -> f64 {
    debug_assert_eq!(matrix.shape(), [3, 3]);
    let m = |i: usize, j: usize| matrix[[i, j]];

    m(0, 0) * (m(1, 1) * m(2, 2) - m(2, 1) * m(1, 2))
        - m(0, 1) * (m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0))
        + m(0, 2) * (m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0))
}

/// Inverse of a 3x3 matrix, or `None` if the matrix is singular.
pub fn inverse(matrix: ArrayView2<'_, f64>) -> Option<Array2<f64>> {
    debug_assert_eq!(matrix.shape(), [3, 3]);
    let det = determinant(matrix);
    let scale = matrix.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if det == 0.0 || !det.is_finite() || det.abs() < 1e-12 * scale * scale * scale {
        return None;
    }

    let m = |i: usize, j: usize| matrix[[i, j]];
    let inv_det = 1.0 / det;

    let mut inverse = Array2::zeros((3, 3));
    inverse[[0, 0]] = (m(1, 1) * m(2, 2) - m(2, 1) * m(1, 2)) * inv_det;
    inverse[[0, 1]] = (m(0, 2) * m(2, 1) - m(0, 1) * m(2, 2)) * inv_det;
    inverse[[0, 2]] = (m(0, 1) * m(1, 2) - m(0, 2) * m(1, 1)) * inv_det;
    inverse[[1, 0]] = (m(1, 2) * m(2, 0) - m(1, 0) * m(2, 2)) * inv_det;
    inverse[[1, 1]] = (m(0, 0) * m(2, 2) - m(0, 2) * m(2, 0)) * inv_det;
    inverse[[1, 2]] = (m(1, 0) * m(0, 2) - m(0, 0) * m(1, 2)) * inv_det;
    inverse[[2, 0]] = (m(1, 0) * m(2, 1) - m(2, 0) * m(1, 1)) * inv_det;
    inverse[[2, 1]] = (m(2, 0) * m(0, 1) - m(0, 0) * m(2, 1)) * inv_det;
    inverse[[2, 2]] = (m(0, 0) * m(1, 1) - m(1, 0) * m(0, 1)) * inv_det;

    return Some(inverse);
}

/// Get the row and column indexes of the strict upper triangle of a `n x n`
/// matrix, in row-major order. This is the equivalent of numpy's
/// `triu_indices(n, k=1)`.
pub fn triu_indices(n: usize) -> (Vec<usize>, Vec<usize>) {
    let count = n * n.saturating_sub(1) / 2;
    let mut rows = Vec::with_capacity(count);
    let mut columns = Vec::with_capacity(count);
    for i in 0..n {
        for j in (i + 1)..n {
            rows.push(i);
            columns.push(j);
        }
    }

    return (rows, columns);
}

/// Get the permutation sorting `values` in ascending order. Equal values keep
/// their relative order.
pub fn stable_argsort(values: &[usize]) -> Vec<usize> {
    let mut indexes = (0..values.len()).collect::<Vec<_>>();
    // `sort_by_key` is a stable sort
    indexes.sort_by_key(|&i| values[i]);
    return indexes;
}
