use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::metric::MetricValue;

/// What an expectation decides when no sample matched the control.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum EmptyObservationPolicy {
    #[default]
    #[strum(serialize = "fail")]
    Fail,
    #[strum(serialize = "pass")]
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Equals(f64),
    AtLeast(f64),
    AtMost(f64),
    /// Inclusive on both ends.
    Between(f64, f64),
}

impl Expectation {
    #[inline]
    pub fn accepts(self, value: MetricValue) -> bool {
        let value = value.as_f64();
        match self {
            Expectation::Equals(expected) => (value - expected).abs() <= f64::EPSILON,
            Expectation::AtLeast(minimum) => value >= minimum,
            Expectation::AtMost(maximum) => value <= maximum,
            Expectation::Between(minimum, maximum) => value >= minimum && value <= maximum,
        }
    }

    /// Every observed value has to satisfy the rule. An empty observation is
    /// decided by `on_empty` alone.
    #[inline]
    pub fn evaluate(self, observed: &[MetricValue], on_empty: EmptyObservationPolicy) -> bool {
        if observed.is_empty() {
            return on_empty == EmptyObservationPolicy::Pass;
        }

        observed.iter().all(|value| self.accepts(*value))
    }
}

impl fmt::Display for Expectation {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Equals(expected) => write!(f, "= {expected}"),
            Expectation::AtLeast(minimum) => write!(f, ">= {minimum}"),
            Expectation::AtMost(maximum) => write!(f, "<= {maximum}"),
            Expectation::Between(minimum, maximum) => write!(f, "in [{minimum}, {maximum}]"),
        }
    }
}
