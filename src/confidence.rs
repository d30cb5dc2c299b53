// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Confidence weighting for implicit feedback.
//!
//! Implicit observations are weighted, not trusted: a pair's confidence
//! grows linearly with its observation count, and untouched pairs keep the
//! baseline weight of 1 on a zero preference.

use crate::data::InteractionMatrix;

/// Map an observation count to its confidence weight `1 + α·count`.
pub fn confidence(count: f64, alpha: f64) -> f64 {
    1.0 + alpha * count
}

/// Get the confidence weight for a user-item pair.
///
/// Untouched pairs get the baseline weight of 1.  Panics if `user` is out
/// of range.
pub fn confidence_for(data: &InteractionMatrix, user: usize, item: usize, alpha: f64) -> f64 {
    match data.count(user, item) {
        Some(count) => confidence(count, alpha),
        None => 1.0,
    }
}

/// Get the binary preference indicator for a user-item pair.
///
/// Panics if `user` is out of range.
pub fn indicator_for(data: &InteractionMatrix, user: usize, item: usize) -> f64 {
    if data.count(user, item).is_some() {
        1.0
    } else {
        0.0
    }
}
