// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Alternating least squares for implicit feedback.
//!
//! This implements the confidence-weighted scheme of Hu, Koren, and
//! Volinsky: observation counts become confidence weights on a binary
//! preference, and the two factor matrices are refit alternately, each
//! row by a regularized least-squares solve over the rows it touched.

mod implicit;
mod solve;

use log::*;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::confidence::confidence;
use crate::data::InteractionMatrix;
use crate::errors::{Error, Side};
use crate::model::ImplicitALSModel;

use implicit::train_implicit_half;

/// Hyperparameters for implicit-feedback ALS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplicitALSConfig {
    /// The dimension of the latent factor space.
    pub factors: usize,
    /// The regularization strength λ.
    pub regularization: f64,
    /// The confidence scale α applied to observation counts.
    pub alpha: f64,
    /// The number of training iterations; each runs both half-steps.
    pub iterations: u32,
    /// The seed for factor initialization.
    pub seed: u64,
}

impl Default for ImplicitALSConfig {
    fn default() -> ImplicitALSConfig {
        ImplicitALSConfig {
            factors: 50,
            regularization: 0.1,
            alpha: 40.0,
            iterations: 10,
            seed: 0,
        }
    }
}

impl ImplicitALSConfig {
    /// Check that all hyperparameters are in their domains.
    pub fn validate(&self) -> Result<(), Error> {
        if self.factors == 0 {
            return Err(Error::InvalidConfig("factor count must be positive"));
        }
        if self.iterations == 0 {
            return Err(Error::InvalidConfig("iteration count must be positive"));
        }
        if self.regularization.is_nan() || self.regularization < 0.0 {
            return Err(Error::InvalidConfig("regularization must be non-negative"));
        }
        if self.alpha.is_nan() || self.alpha < 0.0 {
            return Err(Error::InvalidConfig("alpha must be non-negative"));
        }
        Ok(())
    }
}

/// Diagnostics from one training iteration.
#[derive(Debug, Clone, Copy)]
pub struct EpochStats {
    /// The 1-based number of the completed iteration.
    pub epoch: u32,
    /// The Frobenius norm of the change to the user factors.
    pub user_change: f64,
    /// The Frobenius norm of the change to the item factors.
    pub item_change: f64,
    /// The training objective after this iteration.
    pub objective: f64,
}

/// Incremental trainer for implicit-feedback ALS models.
///
/// [train_implicit] runs the configured number of iterations; driving
/// [ImplicitALSTrainer::epoch] directly lets callers watch convergence or
/// stop early.  If an epoch fails the factors are partially updated and the
/// trainer should be discarded.
pub struct ImplicitALSTrainer<'a> {
    config: ImplicitALSConfig,
    data: &'a InteractionMatrix,
    user_factors: Array2<f64>,
    item_factors: Array2<f64>,
    epoch: u32,
}

impl<'a> ImplicitALSTrainer<'a> {
    /// Set up a trainer, seeding both factor matrices.
    pub fn new(
        config: ImplicitALSConfig,
        data: &'a InteractionMatrix,
    ) -> Result<ImplicitALSTrainer<'a>, Error> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let user_factors = init_factors(&mut rng, data.n_users(), config.factors);
        let item_factors = init_factors(&mut rng, data.n_items(), config.factors);
        Ok(ImplicitALSTrainer {
            config,
            data,
            user_factors,
            item_factors,
            epoch: 0,
        })
    }

    /// Run one training iteration: a user half-step, then an item half-step.
    pub fn epoch(&mut self) -> Result<EpochStats, Error> {
        let user_change = train_implicit_half(
            self.data.user_matrix(),
            &mut self.user_factors,
            &self.item_factors.view(),
            self.config.alpha,
            self.config.regularization,
            Side::User,
        )?;
        let item_change = train_implicit_half(
            self.data.item_matrix(),
            &mut self.item_factors,
            &self.user_factors.view(),
            self.config.alpha,
            self.config.regularization,
            Side::Item,
        )?;
        self.epoch += 1;
        let objective = self.objective();
        debug!(
            "epoch {}: user change {:.6}, item change {:.6}, objective {:.6}",
            self.epoch, user_change, item_change, objective
        );
        Ok(EpochStats {
            epoch: self.epoch,
            user_change,
            item_change,
            objective,
        })
    }

    /// Compute the training objective at the current factors.
    pub fn objective(&self) -> f64 {
        objective(
            self.data,
            self.config.alpha,
            self.config.regularization,
            &self.user_factors,
            &self.item_factors,
        )
    }

    /// Get the current user factor matrix.
    pub fn user_factors(&self) -> &Array2<f64> {
        &self.user_factors
    }

    /// Get the current item factor matrix.
    pub fn item_factors(&self) -> &Array2<f64> {
        &self.item_factors
    }

    /// Freeze the factors into a model.
    pub fn finish(self) -> ImplicitALSModel {
        ImplicitALSModel::from_factors(self.user_factors, self.item_factors)
    }
}

/// Train an implicit-feedback ALS model with a fixed iteration count.
pub fn train_implicit(
    config: &ImplicitALSConfig,
    data: &InteractionMatrix,
) -> Result<ImplicitALSModel, Error> {
    let mut trainer = ImplicitALSTrainer::new(config.clone(), data)?;
    debug!(
        "training {}x{} implicit ALS model ({} factors, {} observations)",
        data.n_users(),
        data.n_items(),
        config.factors,
        data.nnz()
    );
    for _ in 0..config.iterations {
        trainer.epoch()?;
    }
    Ok(trainer.finish())
}

/// Seed a factor matrix with small uniform values.
fn init_factors(rng: &mut StdRng, rows: usize, factors: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, factors), |_| rng.gen_range(-0.1..0.1))
}

/// The confidence-weighted regularized squared error over all user-item
/// pairs, touched or not.
///
/// The untouched mass is folded into `trace((XᵀX)(YᵀY))`, so the cost is
/// linear in the observations instead of quadratic in the catalog.
fn objective(
    data: &InteractionMatrix,
    alpha: f64,
    regularization: f64,
    x: &Array2<f64>,
    y: &Array2<f64>,
) -> f64 {
    let gx = x.t().dot(x);
    let gy = y.t().dot(y);
    let all_pairs = (&gx * &gy).sum();

    let ui = data.user_matrix();
    let touched: f64 = (0..ui.n_rows)
        .into_par_iter()
        .map(|u| {
            let xu = x.row(u);
            ui.row_cols(u)
                .iter()
                .zip(ui.row_vals(u))
                .map(|(&i, &count)| {
                    let s = xu.dot(&y.row(i as usize));
                    let c = confidence(count, alpha);
                    c * (1.0 - s).powi(2) - s.powi(2)
                })
                .sum::<f64>()
        })
        .sum();

    let reg = x.iter().map(|v| v * v).sum::<f64>() + y.iter().map(|v| v * v).sum::<f64>();
    all_pairs + touched + regularization * reg
}
