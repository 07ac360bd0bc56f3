//! Deterministic rule cascades layered on top of the classifier verdict.

mod advice;
mod anomaly;

pub use advice::{recommend, AdviceRule, ADVICE_RULES, HEALTHY_MESSAGE};
pub use anomaly::{classify, AnomalyRule, AnomalyType, ANOMALY_RULES};
