use crate::{
    metric::{Metric, MetricValue},
    sample::Sample,
};

/// Looks up every observed value of a metric for the samples carrying a
/// given name. Names compare case-insensitively and may match any number of
/// samples, e.g. replicates on several barcodes.
pub trait MetricGetter {
    fn metric_values(&self, sample_name: &str, metric: Metric) -> anyhow::Result<Vec<MetricValue>>;
}

/// The samples of one run, in sample sheet order.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    pub samples: Vec<Sample>,
}

impl SampleSet {
    #[inline]
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
        }
    }

    #[inline]
    pub fn matching<'a>(&'a self, sample_name: &'a str) -> impl Iterator<Item = &'a Sample> + 'a {
        self.samples
            .iter()
            .filter(move |sample| sample.base_name().eq_ignore_ascii_case(sample_name))
    }
}

impl MetricGetter for SampleSet {
    #[inline]
    fn metric_values(&self, sample_name: &str, metric: Metric) -> anyhow::Result<Vec<MetricValue>> {
        self.matching(sample_name)
            .map(|sample| sample.extract_metric_value(metric))
            .collect()
    }
}
