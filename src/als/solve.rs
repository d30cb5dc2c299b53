// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

use log::*;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};
use thiserror::Error;

/// Cholesky diagonal spread below which the system is considered
/// ill-conditioned.
const COND_WARN_RATIO: f64 = 1e-7;

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("matrix is not positive definite")]
    NotPositive,
}

/// Solve the symmetric positive-definite system `a x = b` by Cholesky
/// factorization.
///
/// The matrix must be symmetric; for symmetric input the storage order does
/// not matter.  Fails with [SolveError::NotPositive] when the factorization
/// breaks down, which for regularized normal equations only happens with a
/// zero regularization term.
pub fn dposv(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, SolveError> {
    let mshape = a.shape();
    assert_eq!(mshape[0], mshape[1]);
    assert_eq!(b.len(), mshape[0]);
    let n = mshape[0];

    let a = DMatrix::from_iterator(n, n, a.iter().copied());
    let b = DVector::from_iterator(n, b.iter().copied());

    let chol = a.cholesky().ok_or(SolveError::NotPositive)?;

    // the factor's diagonal spread is a cheap conditioning estimate
    let factor = chol.l_dirty();
    let mut dmin = f64::INFINITY;
    let mut dmax = 0.0f64;
    for i in 0..n {
        let d = factor[(i, i)];
        dmin = dmin.min(d);
        dmax = dmax.max(d);
    }
    if dmin < dmax * COND_WARN_RATIO {
        warn!(
            "normal equations are ill-conditioned (diagonal ratio {:.2e})",
            dmin / dmax
        );
    }

    let x = chol.solve(&b);
    Ok(x.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_identity_solve() {
        let a = Array2::eye(3);
        let b = arr1(&[1.0, -2.0, 0.5]);
        let x = dposv(&a, &b).unwrap();
        assert_eq!(x.len(), 3);
        for (xi, bi) in x.iter().zip(b.iter()) {
            assert!((xi - bi).abs() < 1.0e-12);
        }
    }

    #[test]
    fn test_spd_solve() {
        // a * [1, 2] = [8, 8]
        let a = arr2(&[[4.0, 2.0], [2.0, 3.0]]);
        let b = arr1(&[8.0, 8.0]);
        let x = dposv(&a, &b).unwrap();
        assert!((x[0] - 1.0).abs() < 1.0e-10);
        assert!((x[1] - 2.0).abs() < 1.0e-10);
    }

    #[test]
    fn test_singular_matrix_fails() {
        // rank-1 matrix, not positive definite
        let a = arr2(&[[1.0, 1.0], [1.0, 1.0]]);
        let b = arr1(&[1.0, 1.0]);
        match dposv(&a, &b) {
            Err(SolveError::NotPositive) => (),
            Ok(_) => panic!("singular solve should fail"),
        }
    }
}
