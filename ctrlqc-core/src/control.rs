use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    error::QcError,
    expectation::{EmptyObservationPolicy, Expectation},
    metric::Metric,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlExpectation {
    pub metric:   Metric,
    pub rule:     Expectation,
    /// Overrides the run-wide policy for controls that match no sample.
    pub on_empty: Option<EmptyObservationPolicy>,
}

/// A reference sample with known QC characteristics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSample {
    pub name:         String,
    pub expectations: Vec<ControlExpectation>,
}

pub trait ControlDefinitionSource {
    fn control_definitions(&self) -> anyhow::Result<Vec<ControlSample>>;
}

impl ControlDefinitionSource for Vec<ControlSample> {
    #[inline]
    fn control_definitions(&self) -> anyhow::Result<Vec<ControlSample>> {
        Ok(self.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ControlFile {
    #[serde(default)]
    controls: Vec<RawControl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawControl {
    name:         String,
    #[serde(default)]
    expectations: Vec<RawExpectation>,
}

// Metric tags stay strings until conversion so unknown tags surface as
// `QcError::UnsupportedMetric` instead of a generic YAML error. Rules are
// written as single-key maps, e.g. `{ at_least: 100000 }`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExpectation {
    metric:   String,
    #[serde(with = "serde_yaml::with::singleton_map")]
    rule:     Expectation,
    #[serde(default)]
    on_empty: Option<EmptyObservationPolicy>,
}

impl RawControl {
    fn into_control(self) -> anyhow::Result<ControlSample> {
        if self.expectations.is_empty() {
            return Err(QcError::EmptyControl(self.name).into());
        }

        let name = &self.name;
        let expectations = self
            .expectations
            .into_iter()
            .map(|raw| -> anyhow::Result<ControlExpectation> {
                if let Expectation::Between(min, max) = raw.rule {
                    if min > max {
                        return Err(QcError::InvalidExpectation {
                            control: name.clone(),
                            reason:  format!("lower bound {min} exceeds upper bound {max}"),
                        }
                        .into());
                    }
                }
                Ok(ControlExpectation {
                    metric:   Metric::parse(&raw.metric)?,
                    rule:     raw.rule,
                    on_empty: raw.on_empty,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .with_context(|| format!("Invalid expectations for control {}", self.name))?;

        Ok(ControlSample {
            name: self.name,
            expectations,
        })
    }
}

/// Control definitions stored as YAML.
#[derive(Debug, Clone)]
pub struct YamlControlDefinitions {
    pub path: PathBuf,
}

impl YamlControlDefinitions {
    #[inline]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    #[inline]
    pub fn parse(yaml: &str) -> anyhow::Result<Vec<ControlSample>> {
        let file: ControlFile = serde_yaml::from_str(yaml)?;
        file.controls.into_iter().map(RawControl::into_control).collect()
    }
}

impl ControlDefinitionSource for YamlControlDefinitions {
    #[inline]
    fn control_definitions(&self) -> anyhow::Result<Vec<ControlSample>> {
        let yaml = std::fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read control definitions from {}", self.path.display())
        })?;
        Self::parse(&yaml)
            .with_context(|| format!("Invalid control definitions in {}", self.path.display()))
    }
}
