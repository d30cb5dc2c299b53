// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Trained factor models.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// A trained pair of latent factor matrices.
///
/// Models are immutable: training builds a fresh one, so a scorer never
/// observes factors from a half-finished iteration.
#[derive(Debug, Clone)]
pub struct ImplicitALSModel {
    user_factors: Array2<f64>,
    item_factors: Array2<f64>,
}

impl ImplicitALSModel {
    /// Assemble a model from its factor matrices.
    ///
    /// Panics if the matrices disagree on the latent dimension.
    pub fn from_factors(user_factors: Array2<f64>, item_factors: Array2<f64>) -> ImplicitALSModel {
        assert_eq!(user_factors.ncols(), item_factors.ncols());
        debug_assert!(user_factors.iter().all(|v| v.is_finite()));
        debug_assert!(item_factors.iter().all(|v| v.is_finite()));
        ImplicitALSModel {
            user_factors,
            item_factors,
        }
    }

    /// Get the number of user rows.
    pub fn n_users(&self) -> usize {
        self.user_factors.nrows()
    }

    /// Get the number of item rows.
    pub fn n_items(&self) -> usize {
        self.item_factors.nrows()
    }

    /// Get the latent dimension.
    pub fn dimension(&self) -> usize {
        self.user_factors.ncols()
    }

    /// Get the `n_users × k` user factor matrix.
    pub fn user_factors(&self) -> &Array2<f64> {
        &self.user_factors
    }

    /// Get the `n_items × k` item factor matrix.
    pub fn item_factors(&self) -> &Array2<f64> {
        &self.item_factors
    }

    /// Predict the affinity of a user for an item.
    ///
    /// Scores approximate the preference indicator but are unbounded, and
    /// are deliberately not clipped or normalized; negative scores are
    /// legitimate output.
    pub fn score(&self, user: usize, item: usize) -> Result<f64, Error> {
        self.check_user(user)?;
        self.check_item(item)?;
        Ok(self.user_factors.row(user).dot(&self.item_factors.row(item)))
    }

    /// Predict a user's affinity for several items at once.
    pub fn score_items(&self, user: usize, items: &[usize]) -> Result<Vec<f64>, Error> {
        self.check_user(user)?;
        let xu = self.user_factors.row(user);
        items
            .iter()
            .map(|&item| {
                self.check_item(item)?;
                Ok(xu.dot(&self.item_factors.row(item)))
            })
            .collect()
    }

    /// Export the factors for the storage layer.
    pub fn export(&self) -> FactorExport {
        FactorExport {
            users: FactorMatrix::from_array(&self.user_factors),
            items: FactorMatrix::from_array(&self.item_factors),
        }
    }

    pub(crate) fn check_user(&self, user: usize) -> Result<(), Error> {
        if user >= self.n_users() {
            Err(Error::UnknownUser {
                user,
                n_users: self.n_users(),
            })
        } else {
            Ok(())
        }
    }

    fn check_item(&self, item: usize) -> Result<(), Error> {
        if item >= self.n_items() {
            Err(Error::UnknownItem {
                item,
                n_items: self.n_items(),
            })
        } else {
            Ok(())
        }
    }
}

/// A dense factor matrix in flat row-major form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorMatrix {
    /// The number of rows (users or items).
    pub rows: usize,
    /// The number of columns (the latent dimension).
    pub cols: usize,
    /// Row-major values, `rows * cols` long.
    pub values: Vec<f64>,
}

impl FactorMatrix {
    fn from_array(a: &Array2<f64>) -> FactorMatrix {
        FactorMatrix {
            rows: a.nrows(),
            cols: a.ncols(),
            values: a.iter().copied().collect(),
        }
    }
}

/// Both factor matrices, shaped for downstream storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorExport {
    pub users: FactorMatrix,
    pub items: FactorMatrix,
}
