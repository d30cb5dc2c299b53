// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Implicit-feedback matrix factorization for recommendation.
//!
//! This crate implements confidence-weighted alternating least squares in
//! the style of Hu, Koren, and Volinsky: interaction counts become
//! confidence weights on a binary preference, user and item factors are
//! refit alternately with row-parallel regularized least-squares solves,
//! and the trained factors score and rank unseen items per user.
//!
//! ```
//! use lenskit_implicit::{train_implicit, ImplicitALSConfig, Interaction, InteractionMatrix};
//!
//! let data = InteractionMatrix::from_interactions(
//!     2,
//!     3,
//!     vec![Interaction::new(0, 0, 3), Interaction::new(1, 2, 1)],
//! )?;
//! let config = ImplicitALSConfig {
//!     factors: 8,
//!     ..Default::default()
//! };
//! let model = train_implicit(&config, &data)?;
//! let recs = model.recommend(&data, 0, 2, true)?;
//! assert!(recs.len() <= 2);
//! # Ok::<(), lenskit_implicit::Error>(())
//! ```

pub mod als;
pub mod confidence;
pub mod data;
pub mod errors;
pub mod model;
pub mod parallel;
pub mod sparse;
mod topn;

pub use als::{train_implicit, EpochStats, ImplicitALSConfig, ImplicitALSTrainer};
pub use data::{Interaction, InteractionMatrix};
pub use errors::{Error, Side};
pub use model::{FactorExport, FactorMatrix, ImplicitALSModel};
