// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Interaction data storage.

use log::*;

use crate::errors::{Error, Side};
use crate::sparse::{COOMatrixBuilder, CSRMatrix};

/// A single implicit-feedback observation.
///
/// Users and items are densified indices from the caller's vocabulary; the
/// count is how many times the pair was observed, not a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub user: u32,
    pub item: u32,
    pub count: u32,
}

impl Interaction {
    pub fn new(user: u32, item: u32, count: u32) -> Interaction {
        Interaction { user, item, count }
    }
}

/// The user-item observation matrix, stored in both orientations.
///
/// Built once per training run and read-only afterwards.  Rows of both
/// views are sorted by column index, so single pairs can be looked up by
/// binary search.
pub struct InteractionMatrix {
    ui: CSRMatrix,
    iu: CSRMatrix,
}

impl InteractionMatrix {
    /// Build the matrix from interaction records.
    ///
    /// Records outside the declared user or item range fail with
    /// [Error::InvalidIndex].  Zero-count records carry no observation and
    /// are dropped.  Repeated pairs are kept as-is; callers should
    /// aggregate counts upstream.
    pub fn from_interactions<I>(
        n_users: usize,
        n_items: usize,
        records: I,
    ) -> Result<InteractionMatrix, Error>
    where
        I: IntoIterator<Item = Interaction>,
    {
        let records = records.into_iter();
        let mut bld = COOMatrixBuilder::with_capacity(records.size_hint().0);
        let mut n_zero = 0;
        for rec in records {
            if rec.user as usize >= n_users {
                return Err(Error::InvalidIndex {
                    side: Side::User,
                    index: rec.user,
                    bound: n_users,
                });
            }
            if rec.item as usize >= n_items {
                return Err(Error::InvalidIndex {
                    side: Side::Item,
                    index: rec.item,
                    bound: n_items,
                });
            }
            if rec.count == 0 {
                n_zero += 1;
                continue;
            }
            bld.add_entry(rec.user, rec.item, rec.count as f64);
        }
        if n_zero > 0 {
            debug!("dropped {} zero-count records", n_zero);
        }

        // transposing twice leaves both views sorted by column index
        let grouped = CSRMatrix::from_coo(n_users, n_items, &bld.finish());
        let iu = grouped.transpose();
        let ui = iu.transpose();
        debug!(
            "built {}x{} interaction matrix with {} observations",
            n_users,
            n_items,
            ui.nnz()
        );

        Ok(InteractionMatrix { ui, iu })
    }

    /// Get the number of users.
    pub fn n_users(&self) -> usize {
        self.ui.n_rows
    }

    /// Get the number of items.
    pub fn n_items(&self) -> usize {
        self.iu.n_rows
    }

    /// Get the number of observed user-item pairs.
    pub fn nnz(&self) -> usize {
        self.ui.nnz()
    }

    /// Get the user-major compressed view (one row per user).
    pub fn user_matrix(&self) -> &CSRMatrix {
        &self.ui
    }

    /// Get the item-major compressed view (one row per item).
    pub fn item_matrix(&self) -> &CSRMatrix {
        &self.iu
    }

    /// Iterate a user's touched items with their observation counts.
    ///
    /// Panics if `user` is out of range.
    pub fn items_for_user(&self, user: usize) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.ui
            .row_cols(user)
            .iter()
            .copied()
            .zip(self.ui.row_vals(user).iter().copied())
    }

    /// Iterate an item's users with their observation counts.
    ///
    /// Panics if `item` is out of range.
    pub fn users_for_item(&self, item: usize) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.iu
            .row_cols(item)
            .iter()
            .copied()
            .zip(self.iu.row_vals(item).iter().copied())
    }

    /// Look up a single pair's observation count, if the pair was touched.
    ///
    /// Panics if `user` is out of range.
    pub fn count(&self, user: usize, item: usize) -> Option<f64> {
        let cols = self.ui.row_cols(user);
        cols.binary_search(&(item as u32))
            .ok()
            .map(|pos| self.ui.row_vals(user)[pos])
    }
}
