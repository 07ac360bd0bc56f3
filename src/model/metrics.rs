//! Accuracy and per-class precision/recall/f1 for the two routine classes.

use crate::dataset::Label;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub normal: ClassMetrics,
    pub anomalous: ClassMetrics,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn class_metrics(actual: &[Label], predicted: &[Label], class: Label) -> ClassMetrics {
    let mut tp = 0;
    let mut fp = 0;
    let mut fn_ = 0;
    for (a, p) in actual.iter().zip(predicted.iter()) {
        match (*a == class, *p == class) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    ClassMetrics {
        precision,
        recall,
        f1,
        support: tp + fn_,
    }
}

impl ClassificationReport {
    /// Pairs are compared up to the shorter of the two slices.
    pub fn from_predictions(actual: &[Label], predicted: &[Label]) -> Self {
        let n = actual.len().min(predicted.len());
        let (actual, predicted) = (&actual[..n], &predicted[..n]);
        let correct = actual.iter().zip(predicted).filter(|(a, p)| a == p).count();
        Self {
            accuracy: ratio(correct, n),
            normal: class_metrics(actual, predicted, Label::Normal),
            anomalous: class_metrics(actual, predicted, Label::Anomalous),
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>10} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1", "support")?;
        for (name, m) in [("normal", &self.normal), ("anomalous", &self.anomalous)] {
            writeln!(
                f,
                "{:>10} {:>9.3} {:>9.3} {:>9.3} {:>9}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        write!(f, "{:>10} {:>9.3}", "accuracy", self.accuracy)
    }
}
