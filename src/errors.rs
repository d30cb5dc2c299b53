// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Error types for the implicit-feedback training core.

use std::fmt;

use thiserror::Error;

/// The side of the factorization a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    User,
    Item,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::User => write!(f, "user"),
            Side::Item => write!(f, "item"),
        }
    }
}

/// Errors reported by data ingest, training, and scoring.
#[derive(Error, Debug)]
pub enum Error {
    /// An interaction record referenced an index outside the declared range.
    #[error("{side} index {index} out of range (expected < {bound})")]
    InvalidIndex { side: Side, index: u32, bound: usize },

    /// A hyperparameter was outside its domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A row's normal equations were not positive definite.
    #[error("normal equations for {side} {index} are not positive definite")]
    SingularSystem { side: Side, index: usize },

    /// A query referenced a user the model was not trained with.
    #[error("user {user} not in model (expected < {n_users})")]
    UnknownUser { user: usize, n_users: usize },

    /// A query referenced an item the model was not trained with.
    #[error("item {item} not in model (expected < {n_items})")]
    UnknownItem { item: usize, n_items: usize },

    /// The worker pool could not be initialized.
    #[error("thread pool setup failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[test]
fn test_side_display() {
    assert_eq!(format!("{}", Side::User), "user");
    assert_eq!(format!("{}", Side::Item), "item");
}

#[test]
fn test_error_messages() {
    let e = Error::InvalidIndex {
        side: Side::Item,
        index: 10,
        bound: 5,
    };
    assert_eq!(format!("{}", e), "item index 10 out of range (expected < 5)");

    let e = Error::SingularSystem {
        side: Side::User,
        index: 3,
    };
    assert!(format!("{}", e).contains("user 3"));
}
