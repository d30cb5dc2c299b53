// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2025 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Worker pool management for row-parallel training.

use log::*;
use rayon::{current_num_threads, ThreadPoolBuilder};

use crate::errors::Error;

/// Initialize the global worker pool with a fixed thread count.
///
/// Training parallelizes over factor rows on this pool.  Rayon only lets
/// the global pool be configured once, so call this before the first
/// training run; skipping it entirely is fine and uses rayon's default.
pub fn init_parallel_pool(n_threads: usize) -> Result<(), Error> {
    debug!("initializing worker pool with {} threads", n_threads);
    ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()?;
    Ok(())
}

/// Get the number of threads training will use.
pub fn thread_count() -> usize {
    current_num_threads()
}

#[test]
fn test_thread_count_positive() {
    assert!(thread_count() > 0);
}
