//! Synthetic labeled corpus used to train the classifier at startup.
//! 70% healthy routines, 30% drawn from the unhealthy archetypes, shuffled then split.

mod archetype;
mod sampler;

pub use archetype::Archetype;
pub use sampler::Sampler;

use crate::config::DatasetConfig;
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use tracing::info;

const NORMAL_SHARE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Normal = 0,
    Anomalous = 1,
}

impl Label {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Self {
        if i == 0 {
            Label::Normal
        } else {
            Label::Anomalous
        }
    }
}

/// Train/test split of labeled feature vectors.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub train_features: Vec<FeatureVector>,
    pub test_features: Vec<FeatureVector>,
    pub train_labels: Vec<Label>,
    pub test_labels: Vec<Label>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.train_features.len() + self.test_features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generate `n_samples` labeled vectors and split off `test_fraction` for evaluation.
/// The same seed always produces the same corpus.
pub fn generate(n_samples: usize, test_fraction: f64, seed: u64) -> Dataset {
    let mut sampler = Sampler::with_seed(seed);

    let n_normal = (n_samples as f64 * NORMAL_SHARE) as usize;
    let n_anomalous = n_samples - n_normal;

    let mut samples: Vec<(FeatureVector, Label)> = Vec::with_capacity(n_samples);
    for _ in 0..n_normal {
        let metrics = Archetype::Normal.sample(&mut sampler);
        samples.push((metrics.to_vector(), Label::Normal));
    }
    for _ in 0..n_anomalous {
        let kind = *sampler.choose(&Archetype::ANOMALOUS);
        let metrics = kind.sample(&mut sampler);
        samples.push((metrics.to_vector(), Label::Anomalous));
    }

    sampler.shuffle(&mut samples);

    let split = (n_samples as f64 * (1.0 - test_fraction)) as usize;
    let test = samples.split_off(split.min(samples.len()));
    let (train_features, train_labels) = samples.into_iter().unzip();
    let (test_features, test_labels): (Vec<_>, Vec<_>) = test.into_iter().unzip();

    info!(
        n_samples,
        n_normal,
        n_anomalous,
        train = n_samples - test_features.len(),
        test = test_features.len(),
        "generated synthetic dataset"
    );

    Dataset {
        train_features,
        test_features,
        train_labels,
        test_labels,
    }
}

pub fn generate_from_config(config: &DatasetConfig) -> Dataset {
    generate(config.n_samples, config.test_fraction, config.seed)
}
