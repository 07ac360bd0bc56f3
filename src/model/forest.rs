//! Random forest of CART trees for the two-class routine problem.
//!
//! Each tree is grown on a bootstrap sample, considering √d random features per
//! split and minimizing weighted gini impurity. Class probabilities are the
//! leaf class frequencies averaged over trees. Per-tree seeds are drawn from the
//! forest seed up front, so parallel training is reproducible.

use crate::config::ForestConfig;
use crate::features::FEATURE_DIM;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const N_CLASSES: usize = 2;

pub type Row = [f64; FEATURE_DIM];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Node {
    Leaf {
        proba: [f64; N_CLASSES],
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct GrowParams {
    max_depth: usize,
    min_samples_split: usize,
    max_features: usize,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn class_counts(labels: &[usize], idx: &[usize]) -> [usize; N_CLASSES] {
    let mut counts = [0usize; N_CLASSES];
    for &i in idx {
        counts[labels[i]] += 1;
    }
    counts
}

/// n · gini, i.e. n - Σ c²/n. Summing this over children gives the weighted impurity.
fn weighted_gini(counts: &[usize; N_CLASSES]) -> f64 {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return 0.0;
    }
    let sq: f64 = counts.iter().map(|&c| (c * c) as f64).sum();
    n as f64 - sq / n as f64
}

impl DecisionTree {
    fn grow(rows: &[Row], labels: &[usize], sample: Vec<usize>, params: &GrowParams, rng: &mut ChaCha8Rng) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.build(rows, labels, sample, 0, params, rng);
        tree
    }

    fn build(
        &mut self,
        rows: &[Row],
        labels: &[usize],
        idx: Vec<usize>,
        depth: usize,
        params: &GrowParams,
        rng: &mut ChaCha8Rng,
    ) -> usize {
        let counts = class_counts(labels, &idx);
        let node_id = self.nodes.len();
        self.nodes.push(Self::leaf(&counts));

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        if pure || depth >= params.max_depth || idx.len() < params.min_samples_split {
            return node_id;
        }

        let Some(best) = Self::best_split(rows, labels, &idx, params.max_features, rng) else {
            return node_id;
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = idx
            .into_iter()
            .partition(|&i| rows[i][best.feature] <= best.threshold);

        let left = self.build(rows, labels, left_idx, depth + 1, params, rng);
        let right = self.build(rows, labels, right_idx, depth + 1, params, rng);
        self.nodes[node_id] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        node_id
    }

    fn leaf(counts: &[usize; N_CLASSES]) -> Node {
        let n: usize = counts.iter().sum();
        let mut proba = [0.0; N_CLASSES];
        if n > 0 {
            for (p, &c) in proba.iter_mut().zip(counts.iter()) {
                *p = c as f64 / n as f64;
            }
        }
        Node::Leaf { proba }
    }

    /// Visits features in random order. Stops after `max_features` of them once
    /// a valid split is known; keeps going past that while every feature seen so
    /// far was constant on this node.
    fn best_split(
        rows: &[Row],
        labels: &[usize],
        idx: &[usize],
        max_features: usize,
        rng: &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let mut features: Vec<usize> = (0..FEATURE_DIM).collect();
        features.shuffle(rng);

        let total = class_counts(labels, idx);
        let mut best: Option<BestSplit> = None;
        let mut sorted = idx.to_vec();

        for (visited, &f) in features.iter().enumerate() {
            if visited >= max_features && best.is_some() {
                break;
            }
            sorted.sort_by(|&a, &b| rows[a][f].total_cmp(&rows[b][f]));

            let mut left = [0usize; N_CLASSES];
            for k in 0..sorted.len().saturating_sub(1) {
                left[labels[sorted[k]]] += 1;
                let here = rows[sorted[k]][f];
                let next = rows[sorted[k + 1]][f];
                if next <= here {
                    continue;
                }
                let mut right = total;
                for c in 0..N_CLASSES {
                    right[c] -= left[c];
                }
                let impurity = weighted_gini(&left) + weighted_gini(&right);
                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    let mut threshold = here / 2.0 + next / 2.0;
                    if threshold >= next || !threshold.is_finite() {
                        threshold = here;
                    }
                    best = Some(BestSplit {
                        feature: f,
                        threshold,
                        impurity,
                    });
                }
            }
        }
        best
    }

    pub fn predict_proba(&self, row: &Row) -> [f64; N_CLASSES] {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { proba } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub config: ForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit on standardized rows. `labels[i]` is the class index of `rows[i]`.
    /// Callers guarantee non-empty input of equal length.
    pub fn fit(config: &ForestConfig, rows: &[Row], labels: &[usize]) -> Self {
        let params = GrowParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split.max(2),
            max_features: ((FEATURE_DIM as f64).sqrt() as usize).max(1),
        };

        let mut seeder = ChaCha8Rng::seed_from_u64(config.seed);
        let seeds: Vec<u64> = (0..config.n_trees).map(|_| seeder.gen()).collect();
        let n = rows.len();

        let trees = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::grow(rows, labels, sample, &params, &mut rng)
            })
            .collect();

        Self {
            config: config.clone(),
            trees,
        }
    }

    pub fn predict_proba(&self, row: &Row) -> [f64; N_CLASSES] {
        let mut acc = [0.0; N_CLASSES];
        for tree in &self.trees {
            let p = tree.predict_proba(row);
            for c in 0..N_CLASSES {
                acc[c] += p[c];
            }
        }
        let k = self.trees.len().max(1) as f64;
        acc.iter_mut().for_each(|a| *a /= k);
        acc
    }

    /// Most probable class; ties go to the lower index.
    pub fn predict(&self, row: &Row) -> usize {
        argmax(&self.predict_proba(row))
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

pub fn argmax(proba: &[f64; N_CLASSES]) -> usize {
    let mut best = 0;
    for c in 1..N_CLASSES {
        if proba[c] > proba[best] {
            best = c;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(x0: f64, x1: f64) -> Row {
        let mut r = [0.0; FEATURE_DIM];
        r[0] = x0;
        r[1] = x1;
        r
    }

    fn threshold_data() -> (Vec<Row>, Vec<usize>) {
        let rows: Vec<Row> = (0..60).map(|i| row(i as f64, (i % 7) as f64)).collect();
        let labels = (0..60).map(|i| usize::from(i >= 30)).collect();
        (rows, labels)
    }

    fn small_config(n_trees: usize) -> ForestConfig {
        ForestConfig {
            n_trees,
            max_depth: 5,
            min_samples_split: 2,
            seed: 42,
        }
    }

    #[test]
    fn gini_of_pure_and_balanced_nodes() {
        assert_eq!(weighted_gini(&[10, 0]), 0.0);
        assert_eq!(weighted_gini(&[5, 5]), 5.0);
        assert_eq!(weighted_gini(&[0, 0]), 0.0);
    }

    #[test]
    fn forest_learns_a_threshold() {
        let (rows, labels) = threshold_data();
        let forest = RandomForest::fit(&small_config(25), &rows, &labels);
        assert_eq!(forest.n_trees(), 25);
        assert_eq!(forest.predict(&row(2.0, 3.0)), 0);
        assert_eq!(forest.predict(&row(57.0, 3.0)), 1);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let (rows, labels) = threshold_data();
        let forest = RandomForest::fit(&small_config(10), &rows, &labels);
        for r in &rows {
            let p = forest.predict_proba(r);
            assert!((p[0] + p[1] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn depth_is_capped() {
        let rows: Vec<Row> = (0..200).map(|i| row((i * 37 % 101) as f64, (i * 13 % 17) as f64)).collect();
        let labels: Vec<usize> = (0..200).map(|i| (i * 7 % 3 == 0) as usize).collect();
        let forest = RandomForest::fit(&small_config(5), &rows, &labels);
        assert!(forest.trees().iter().all(|t| t.depth() <= 5));
    }

    #[test]
    fn same_seed_same_forest() {
        let (rows, labels) = threshold_data();
        let a = RandomForest::fit(&small_config(8), &rows, &labels);
        let b = RandomForest::fit(&small_config(8), &rows, &labels);
        assert_eq!(a, b);
    }

    #[test]
    fn single_class_input_yields_certain_leaves() {
        let rows: Vec<Row> = (0..10).map(|i| row(i as f64, 0.0)).collect();
        let labels = vec![1usize; 10];
        let forest = RandomForest::fit(&small_config(3), &rows, &labels);
        assert_eq!(forest.predict_proba(&row(4.0, 0.0)), [0.0, 1.0]);
        assert!(forest.trees().iter().all(|t| t.node_count() == 1));
    }

    #[test]
    fn argmax_prefers_lower_index_on_tie() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.2, 0.8]), 1);
    }
}
