// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2025 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Coordinate (triplet) sparse matrices.

/// A sparse matrix in coordinate form, entries in insertion order.
#[derive(Debug, Clone)]
pub struct COOMatrix {
    pub row: Vec<u32>,
    pub col: Vec<u32>,
    pub val: Vec<f64>,
}

impl COOMatrix {
    /// Get the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.row.len()
    }
}

/// Incremental builder for [COOMatrix].
pub struct COOMatrixBuilder {
    row: Vec<u32>,
    col: Vec<u32>,
    val: Vec<f64>,
}

impl COOMatrixBuilder {
    /// Initialize a COO builder with a capacity hint.
    pub fn with_capacity(cap: usize) -> COOMatrixBuilder {
        COOMatrixBuilder {
            row: Vec::with_capacity(cap),
            col: Vec::with_capacity(cap),
            val: Vec::with_capacity(cap),
        }
    }

    /// Add a single entry to the matrix.
    pub fn add_entry(&mut self, row: u32, col: u32, val: f64) {
        self.row.push(row);
        self.col.push(col);
        self.val.push(val);
    }

    /// Get the number of entries added so far.
    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    /// Build the final COO matrix from this builder.
    pub fn finish(self) -> COOMatrix {
        COOMatrix {
            row: self.row,
            col: self.col,
            val: self.val,
        }
    }
}

#[test]
fn test_empty_builder() {
    let bld = COOMatrixBuilder::with_capacity(10);
    assert!(bld.is_empty());
    let coo = bld.finish();
    assert_eq!(coo.nnz(), 0);
}

#[test]
fn test_build_entries() {
    let mut bld = COOMatrixBuilder::with_capacity(2);
    bld.add_entry(0, 2, 1.0);
    bld.add_entry(1, 0, 3.0);
    bld.add_entry(1, 1, 2.0);
    assert_eq!(bld.len(), 3);

    let coo = bld.finish();
    assert_eq!(coo.nnz(), 3);
    assert_eq!(coo.row, vec![0, 1, 1]);
    assert_eq!(coo.col, vec![2, 0, 1]);
    assert_eq!(coo.val, vec![1.0, 3.0, 2.0]);
}
