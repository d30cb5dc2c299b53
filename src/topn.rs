// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Top-N recommendation over trained factors.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::NotNan;
use rustc_hash::FxHashSet;

use crate::data::InteractionMatrix;
use crate::errors::Error;
use crate::model::ImplicitALSModel;

/// Entries in the recommendation heap.
#[derive(Debug, Clone, Copy)]
struct RecEntry {
    score: NotNan<f64>,
    item: usize,
}

impl PartialEq for RecEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.item == other.item
    }
}

impl Eq for RecEntry {}

impl PartialOrd for RecEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse the score ordering to make a min-heap, with ties falling
        // to the higher item index so the lower one is kept and ranked first
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.item.cmp(&other.item))
    }
}

impl ImplicitALSModel {
    /// Rank the top `n` items for a user by predicted affinity.
    ///
    /// With `exclude_seen`, items the user already touched in `data` are
    /// removed from the candidates.  Results are in descending score order,
    /// with exact ties broken by ascending item index; fewer than `n`
    /// entries come back when the candidate set is small.
    ///
    /// Panics if `data` disagrees with the model's dimensions.
    pub fn recommend(
        &self,
        data: &InteractionMatrix,
        user: usize,
        n: usize,
        exclude_seen: bool,
    ) -> Result<Vec<(usize, f64)>, Error> {
        self.check_user(user)?;
        assert_eq!(self.n_users(), data.n_users());
        assert_eq!(self.n_items(), data.n_items());

        if n == 0 {
            return Ok(Vec::new());
        }

        let seen: FxHashSet<u32> = if exclude_seen {
            data.user_matrix().row_cols(user).iter().copied().collect()
        } else {
            FxHashSet::default()
        };

        // one matrix-vector product scores the whole catalog
        let scores = self.item_factors().dot(&self.user_factors().row(user));

        // the heap never holds more than min(n, catalog size) entries
        let mut heap: BinaryHeap<RecEntry> = BinaryHeap::with_capacity(n.min(scores.len()));
        for (item, score) in scores.iter().enumerate() {
            if exclude_seen && seen.contains(&(item as u32)) {
                continue;
            }
            // factors are finite, so scores are never NaN
            let entry = RecEntry {
                score: NotNan::new(*score).unwrap(),
                item,
            };
            if heap.len() < n {
                heap.push(entry);
            } else if entry < *heap.peek().unwrap() {
                heap.pop();
                heap.push(entry);
            }
        }

        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| (e.item, e.score.into_inner()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::als::{train_implicit, ImplicitALSConfig};
    use crate::data::Interaction;
    use ndarray::arr2;

    /// A k=1 model whose scores for the single user are just the item
    /// factor values: items 0..3 score 3, 2, 5, 4.
    fn ranked_model() -> ImplicitALSModel {
        ImplicitALSModel::from_factors(
            arr2(&[[1.0]]),
            arr2(&[[3.0], [2.0], [5.0], [4.0]]),
        )
    }

    fn seen_data() -> InteractionMatrix {
        // user 0 has touched items 0 and 1
        InteractionMatrix::from_interactions(
            1,
            4,
            vec![Interaction::new(0, 0, 1), Interaction::new(0, 1, 2)],
        )
        .unwrap()
    }

    #[test]
    fn test_rank_all_descending() {
        let model = ranked_model();
        let data = seen_data();
        let recs = model.recommend(&data, 0, 4, false).unwrap();
        assert_eq!(
            recs,
            vec![(2, 5.0), (3, 4.0), (0, 3.0), (1, 2.0)]
        );
    }

    #[test]
    fn test_exclude_seen() {
        let model = ranked_model();
        let data = seen_data();
        let recs = model.recommend(&data, 0, 4, true).unwrap();
        assert_eq!(recs, vec![(2, 5.0), (3, 4.0)]);
    }

    #[test]
    fn test_truncates_to_n() {
        let model = ranked_model();
        let data = seen_data();
        let recs = model.recommend(&data, 0, 1, false).unwrap();
        assert_eq!(recs, vec![(2, 5.0)]);
    }

    #[test]
    fn test_n_beyond_catalog_returns_all() {
        let model = ranked_model();
        let data = seen_data();
        let recs = model.recommend(&data, 0, 100, false).unwrap();
        assert_eq!(recs.len(), 4);
        // an effectively unbounded request still just drains the candidates
        let recs = model.recommend(&data, 0, usize::MAX, true).unwrap();
        assert_eq!(recs, vec![(2, 5.0), (3, 4.0)]);
    }

    #[test]
    fn test_n_zero_is_empty() {
        let model = ranked_model();
        let data = seen_data();
        let recs = model.recommend(&data, 0, 0, true).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_ties_break_by_item_index() {
        // items 0 and 1 have identical factors; 2 scores higher
        let model = ImplicitALSModel::from_factors(
            arr2(&[[1.0]]),
            arr2(&[[1.0], [1.0], [2.0]]),
        );
        let data = InteractionMatrix::from_interactions(1, 3, Vec::new()).unwrap();

        let recs = model.recommend(&data, 0, 3, false).unwrap();
        assert_eq!(recs, vec![(2, 2.0), (0, 1.0), (1, 1.0)]);

        // at the cutoff, the tie still keeps the lower index
        let recs = model.recommend(&data, 0, 2, false).unwrap();
        assert_eq!(recs, vec![(2, 2.0), (0, 1.0)]);
    }

    #[test]
    fn test_unknown_user() {
        let model = ranked_model();
        let data = seen_data();
        match model.recommend(&data, 3, 2, true) {
            Err(Error::UnknownUser { user: 3, n_users: 1 }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    #[should_panic]
    fn test_mismatched_data_panics() {
        let model = ranked_model();
        let data = InteractionMatrix::from_interactions(1, 3, Vec::new()).unwrap();
        let _ = model.recommend(&data, 0, 2, false);
    }

    #[test]
    fn test_scenario_end_to_end() {
        // users 0 and 1 share item 1, so user 0 should be steered toward
        // the items it has not touched rather than an error or a repeat
        let data = InteractionMatrix::from_interactions(
            3,
            4,
            vec![
                Interaction::new(0, 0, 1),
                Interaction::new(0, 1, 3),
                Interaction::new(1, 1, 1),
                Interaction::new(2, 2, 5),
            ],
        )
        .unwrap();
        let config = ImplicitALSConfig {
            factors: 2,
            regularization: 0.1,
            alpha: 1.0,
            iterations: 5,
            seed: 42,
        };
        let model = train_implicit(&config, &data).unwrap();

        let recs = model.recommend(&data, 0, 2, true).unwrap();
        assert_eq!(recs.len(), 2);
        let items: Vec<usize> = recs.iter().map(|r| r.0).collect();
        assert!(items.contains(&2));
        assert!(items.contains(&3));
        assert!(recs[0].1 >= recs[1].1);
    }

    #[test]
    fn test_isolated_user_gets_recommendations() {
        // user 3 has no observations; ranking falls back to its seed
        // factors and must still produce valid items
        let data = InteractionMatrix::from_interactions(
            4,
            4,
            vec![
                Interaction::new(0, 0, 1),
                Interaction::new(0, 1, 3),
                Interaction::new(1, 1, 1),
                Interaction::new(2, 2, 5),
            ],
        )
        .unwrap();
        let config = ImplicitALSConfig {
            factors: 2,
            regularization: 0.1,
            alpha: 1.0,
            iterations: 5,
            seed: 42,
        };
        let model = train_implicit(&config, &data).unwrap();

        let recs = model.recommend(&data, 3, 1, true).unwrap();
        assert_eq!(recs.len(), 1);
        assert!(recs[0].0 < 4);
        assert!(recs[0].1.is_finite());
    }

    #[test]
    fn test_recommendations_never_include_seen() {
        let data = InteractionMatrix::from_interactions(
            3,
            4,
            vec![
                Interaction::new(0, 0, 1),
                Interaction::new(0, 1, 3),
                Interaction::new(1, 1, 1),
                Interaction::new(2, 2, 5),
            ],
        )
        .unwrap();
        let config = ImplicitALSConfig {
            factors: 2,
            regularization: 0.1,
            alpha: 1.0,
            iterations: 5,
            seed: 42,
        };
        let model = train_implicit(&config, &data).unwrap();

        for user in 0..3 {
            let recs = model.recommend(&data, user, 4, true).unwrap();
            for (item, _) in recs {
                assert_eq!(data.count(user, item), None);
            }
        }
    }
}
