// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Compressed sparse row matrices.

use super::COOMatrix;

/// A compressed sparse row matrix with `f64` values.
#[derive(Debug, Clone)]
pub struct CSRMatrix {
    pub n_rows: usize,
    pub n_cols: usize,
    row_ptrs: Vec<usize>,
    col_inds: Vec<u32>,
    values: Vec<f64>,
}

impl CSRMatrix {
    /// Group a coordinate matrix into compressed rows.
    ///
    /// Entries keep their order within each row; transposing twice sorts
    /// every row by column index.
    pub fn from_coo(n_rows: usize, n_cols: usize, coo: &COOMatrix) -> CSRMatrix {
        let nnz = coo.nnz();
        let mut row_ptrs = vec![0usize; n_rows + 1];
        let mut col_inds = vec![0u32; nnz];
        let mut values = vec![0.0f64; nnz];

        // step 1: count row values, placing counts in rps[r+1]
        for r in &coo.row {
            row_ptrs[*r as usize + 1] += 1;
        }

        // step 2: convert row counts into row offsets
        for i in 1..=n_rows {
            let prev = row_ptrs[i - 1];
            row_ptrs[i] += prev;
        }

        // step 3: insert column indices and values into outputs
        let mut row_ips = row_ptrs.clone();
        for i in 0..nnz {
            let r = coo.row[i] as usize;
            let pos = row_ips[r];
            col_inds[pos] = coo.col[i];
            values[pos] = coo.val[i];
            row_ips[r] += 1;
        }

        CSRMatrix {
            n_rows,
            n_cols,
            row_ptrs,
            col_inds,
            values,
        }
    }

    /// Get the "length" (number of rows) in the matrix.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Get the number of observed values in the matrix.
    pub fn nnz(&self) -> usize {
        self.row_ptrs[self.n_rows]
    }

    /// Get the row pointers as a slice.
    pub fn row_ptrs(&self) -> &[usize] {
        &self.row_ptrs
    }

    /// Get the extent in the underlying arrays for a row in the matrix.
    pub fn extent(&self, row: usize) -> (usize, usize) {
        (self.row_ptrs[row], self.row_ptrs[row + 1])
    }

    /// Get the column indices for a row in the matrix.
    pub fn row_cols(&self, row: usize) -> &[u32] {
        let (start, end) = self.extent(row);
        &self.col_inds[start..end]
    }

    /// Get the values for a row in the matrix.
    pub fn row_vals(&self, row: usize) -> &[f64] {
        let (start, end) = self.extent(row);
        &self.values[start..end]
    }

    /// Transpose the matrix, carrying the values along.
    ///
    /// The result's rows are ordered by this matrix's row index, so it is
    /// sorted by column regardless of the input entry order.
    pub fn transpose(&self) -> CSRMatrix {
        let nnz = self.nnz();
        let mut row_ptrs = vec![0usize; self.n_cols + 1];
        let mut col_inds = vec![0u32; nnz];
        let mut values = vec![0.0f64; nnz];

        // step 1: count column values, placing counts in rps[c+1]
        for c in &self.col_inds {
            row_ptrs[*c as usize + 1] += 1;
        }

        // step 2: convert column counts into row offsets
        for i in 1..=self.n_cols {
            let prev = row_ptrs[i - 1];
            row_ptrs[i] += prev;
        }

        // step 3: insert row indices and values into outputs
        let mut row_ips = row_ptrs.clone();
        for row in 0..self.n_rows {
            let (sp, ep) = self.extent(row);
            for ci in sp..ep {
                let cv = self.col_inds[ci] as usize;
                let pos = row_ips[cv];
                col_inds[pos] = row as u32;
                values[pos] = self.values[ci];
                row_ips[cv] += 1;
            }
        }

        CSRMatrix {
            n_rows: self.n_cols,
            n_cols: self.n_rows,
            row_ptrs,
            col_inds,
            values,
        }
    }
}
