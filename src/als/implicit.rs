// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

use ndarray::{Array1, Array2, ArrayView2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use log::*;

use crate::errors::{Error, Side};
use crate::sparse::CSRMatrix;

use super::solve::{dposv, SolveError};

/// Recompute every row of `this` while `other` is held fixed.
///
/// `matrix` is the compressed observation view keyed by `this`'s rows
/// (user-major for the user half-step, item-major for the item one).
/// Rows with no observations are left exactly as they were.  Returns the
/// Frobenius norm of the change across all rows.
pub(super) fn train_implicit_half(
    matrix: &CSRMatrix,
    this: &mut Array2<f64>,
    other: &ArrayView2<f64>,
    alpha: f64,
    regularization: f64,
    side: Side,
) -> Result<f64, Error> {
    assert_eq!(matrix.n_rows, this.nrows());
    assert_eq!(matrix.n_cols, other.nrows());
    assert_eq!(this.ncols(), other.ncols());

    // Gram matrix of the fixed half, shared across all rows
    let mut otor = other.t().dot(other);
    for d in otor.diag_mut() {
        *d += regularization;
    }

    debug!(
        "beginning implicit ALS training half with {} rows",
        this.nrows()
    );
    let frob: f64 = this
        .outer_iter_mut()
        .into_par_iter()
        .enumerate()
        .map(|(i, row)| {
            train_row_solve(matrix, i, row, other, &otor, alpha)
                .map_err(|_| Error::SingularSystem { side, index: i })
        })
        .try_reduce(|| 0.0, |a, b| Ok(a + b))?;

    Ok(frob.sqrt())
}

fn train_row_solve(
    matrix: &CSRMatrix,
    row_num: usize,
    mut row_data: ArrayViewMut1<f64>,
    other: &ArrayView2<f64>,
    otor: &Array2<f64>,
    alpha: f64,
) -> Result<f64, SolveError> {
    let cols = matrix.row_cols(row_num);
    let vals = matrix.row_vals(row_num);

    if cols.is_empty() {
        // isolated row, leave the seed factors in place
        return Ok(0.0);
    }

    let cols: Vec<_> = cols.iter().map(|c| *c as usize).collect();
    // c - 1 = α·count, the extra weight above the baseline
    let mut vals: Array1<_> = vals.iter().map(|v| alpha * v).collect();

    let nd = row_data.len();

    let o_picked = other.select(Axis(0), &cols);

    let mt = o_picked.t();
    let mtl = &mt * &vals;
    let mtm = mtl.dot(&o_picked);
    assert_eq!(mtm.shape(), &[nd, nd]);

    let a = otor + &mtm;
    vals += 1.0;
    let y = mt.dot(&vals);

    let soln = dposv(&a, &y)?;

    let deltas = &soln - &row_data;
    row_data.assign(&soln);

    Ok(deltas.dot(&deltas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparse::COOMatrixBuilder;
    use ndarray::arr2;

    #[test]
    fn test_single_pair_closed_form() {
        // one user, one item, count 2, α=1, λ=0.1, k=1:
        // x = c·y / (y² + λ + (c-1)·y²) = 1.5 / 0.85
        let mut bld = COOMatrixBuilder::with_capacity(1);
        bld.add_entry(0, 0, 2.0);
        let mat = CSRMatrix::from_coo(1, 1, &bld.finish());

        let mut x = Array2::zeros((1, 1));
        let y = arr2(&[[0.5]]);
        let change = train_implicit_half(&mat, &mut x, &y.view(), 1.0, 0.1, Side::User).unwrap();

        let expected = 1.5 / 0.85;
        assert!((x[[0, 0]] - expected).abs() < 1.0e-10);
        assert!((change - expected).abs() < 1.0e-10);
    }

    #[test]
    fn test_empty_rows_keep_values() {
        let bld = COOMatrixBuilder::with_capacity(0);
        let mat = CSRMatrix::from_coo(2, 2, &bld.finish());

        let mut x = arr2(&[[0.3, -0.2], [0.1, 0.4]]);
        let orig = x.clone();
        let y = arr2(&[[0.5, 0.1], [0.2, 0.3]]);
        let change = train_implicit_half(&mat, &mut x, &y.view(), 1.0, 0.1, Side::User).unwrap();

        assert_eq!(change, 0.0);
        assert_eq!(x, orig);
    }

    #[test]
    fn test_zero_regularization_singular() {
        // k=2 with a single observed vector that spans one dimension: the
        // unregularized normal equations have an exactly zero pivot
        let mut bld = COOMatrixBuilder::with_capacity(1);
        bld.add_entry(0, 0, 1.0);
        let mat = CSRMatrix::from_coo(1, 1, &bld.finish());

        let mut x = Array2::zeros((1, 2));
        let y = arr2(&[[0.5, 0.0]]);
        match train_implicit_half(&mat, &mut x, &y.view(), 1.0, 0.0, Side::Item) {
            Err(Error::SingularSystem {
                side: Side::Item,
                index: 0,
            }) => (),
            other => panic!("expected singular system, got {:?}", other),
        }
    }

    #[test]
    fn test_observed_rows_move_toward_preference() {
        // after one half-step, an observed pair's score should be close to 1
        let mut bld = COOMatrixBuilder::with_capacity(2);
        bld.add_entry(0, 0, 20.0);
        bld.add_entry(1, 1, 20.0);
        let mat = CSRMatrix::from_coo(2, 2, &bld.finish());

        let mut x = Array2::zeros((2, 2));
        let y = arr2(&[[0.6, 0.1], [0.1, 0.7]]);
        train_implicit_half(&mat, &mut x, &y.view(), 1.0, 0.1, Side::User).unwrap();

        let s00 = x.row(0).dot(&y.row(0));
        let s11 = x.row(1).dot(&y.row(1));
        assert!((s00 - 1.0).abs() < 0.1, "score {} far from 1", s00);
        assert!((s11 - 1.0).abs() < 0.1, "score {} far from 1", s11);
    }
}
