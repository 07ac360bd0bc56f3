//! Per-dimension standardization (zero mean, unit variance).

use crate::features::{FeatureVector, FEATURE_DIM};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: [f64; FEATURE_DIM],
    /// Population variance
    pub var: [f64; FEATURE_DIM],
    /// sqrt(var), or 1.0 for constant columns
    pub scale: [f64; FEATURE_DIM],
}

impl StandardScaler {
    /// Returns `None` for an empty sample set.
    pub fn fit(samples: &[FeatureVector]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mut mean = [0.0; FEATURE_DIM];
        for s in samples {
            for (m, x) in mean.iter_mut().zip(s.values.iter()) {
                *m += x;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = [0.0; FEATURE_DIM];
        for s in samples {
            for d in 0..FEATURE_DIM {
                var[d] += (s.values[d] - mean[d]).powi(2);
            }
        }
        var.iter_mut().for_each(|v| *v /= n);

        let mut scale = [1.0; FEATURE_DIM];
        for d in 0..FEATURE_DIM {
            let sd = var[d].sqrt();
            if sd > f64::EPSILON {
                scale[d] = sd;
            }
        }
        Some(Self { mean, var, scale })
    }

    pub fn transform(&self, v: &FeatureVector) -> [f64; FEATURE_DIM] {
        let mut out = [0.0; FEATURE_DIM];
        for d in 0..FEATURE_DIM {
            out[d] = (v.values[d] - self.mean[d]) / self.scale[d];
        }
        out
    }

    pub fn transform_all(&self, samples: &[FeatureVector]) -> Vec<[f64; FEATURE_DIM]> {
        samples.iter().map(|s| self.transform(s)).collect()
    }
}
