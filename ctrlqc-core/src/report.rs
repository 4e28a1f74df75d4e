use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub description: String,
    pub passed:      bool,
    /// Itemized for display even when it passed.
    #[serde(default)]
    pub flagged:     bool,
}

impl Outcome {
    #[inline]
    pub fn is_displayed(&self) -> bool {
        !self.passed || self.flagged
    }
}

/// Ordered, append-only collection of pass/fail judgments for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    outcomes: Vec<Outcome>,
}

impl Report {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, description: impl Into<String>, passed: bool) {
        self.outcomes.push(Outcome {
            description: description.into(),
            passed,
            flagged: false,
        });
    }

    #[inline]
    pub fn flag(&mut self, description: impl Into<String>, passed: bool) {
        self.outcomes.push(Outcome {
            description: description.into(),
            passed,
            flagged: true,
        });
    }

    /// True when nothing added so far failed.
    #[inline]
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.passed)
    }

    #[inline]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Outcomes worth showing: failures and flagged entries, in order.
    #[inline]
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_displayed())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl fmt::Display for Report {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success() { "PASSED" } else { "FAILED" };
        write!(f, "QC {status} ({} checks)", self.outcomes.len())?;
        for outcome in self.failures() {
            let mark = if outcome.passed { "flag" } else { "fail" };
            write!(f, "\n  [{mark}] {}", outcome.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_succeeds() {
        let report = Report::new();
        assert!(report.success());
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "QC PASSED (0 checks)");
    }

    #[test]
    fn any_failure_fails_the_report() {
        let mut report = Report::new();
        report.add("a", true);
        report.add("b", false);
        report.add("c", true);
        assert!(!report.success());
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn only_failures_and_flags_are_displayed() {
        let mut report = Report::new();
        report.add("reads ok", true);
        report.add("reads low", false);
        report.flag("M7: received late", true);

        let shown = report
            .failures()
            .map(|outcome| outcome.description.as_str())
            .collect::<Vec<_>>();
        assert_eq!(shown, vec!["reads low", "M7: received late"]);
        assert_eq!(
            report.to_string(),
            "QC FAILED (3 checks)\n  [fail] reads low\n  [flag] M7: received late"
        );
    }

    #[test]
    fn serializes_all_outcomes() {
        let mut report = Report::new();
        report.add("reads ok", true);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "outcomes": [{ "description": "reads ok", "passed": true, "flagged": false }]
            })
        );
    }
}
