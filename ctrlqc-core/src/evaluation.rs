use itertools::Itertools;
use tracing::debug;

use crate::{
    control::{ControlExpectation, ControlSample},
    expectation::EmptyObservationPolicy,
    getter::MetricGetter,
    metric::MetricValue,
    report::Report,
};

/// Checks every expectation of every control and appends one outcome per
/// (control, metric) pair. A failure does not stop the remaining checks; an
/// error from the getter aborts the whole evaluation.
#[inline]
pub fn evaluate_controls(
    controls: &[ControlSample],
    getter: &dyn MetricGetter,
    default_on_empty: EmptyObservationPolicy,
    report: &mut Report,
) -> anyhow::Result<()> {
    for control in controls {
        for expectation in &control.expectations {
            let observed = getter.metric_values(&control.name, expectation.metric)?;
            let on_empty = expectation.on_empty.unwrap_or(default_on_empty);
            let passed = expectation.rule.evaluate(&observed, on_empty);
            debug!(
                control = %control.name,
                metric = %expectation.metric,
                observed = observed.len(),
                passed,
                "Evaluated control"
            );
            report.add(describe(&control.name, expectation, &observed), passed);
        }
    }

    Ok(())
}

fn describe(control: &str, expectation: &ControlExpectation, observed: &[MetricValue]) -> String {
    let observed = if observed.is_empty() {
        String::from("no matching samples")
    } else {
        format!("observed {}", observed.iter().join(", "))
    };
    format!(
        "{control}: {} {} ({observed})",
        expectation.metric, expectation.rule
    )
}
