//! Goodness-of-fit metrics for model predictions against observations.

use serde::{Deserialize, Serialize};

use super::SamplePoint;

/// Predictions within this many percentage points count as accurate.
pub const ACCURACY_TOLERANCE: f32 = 15.0;

/// Validation metrics for one simulated series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Root mean square error in percentage points.
    pub rmse: f32,
    /// Pearson correlation between observed and predicted, in percent.
    pub correlation: f32,
    /// Share of samples with error below [`ACCURACY_TOLERANCE`], in percent.
    pub predictive_accuracy: f32,
    /// Mean observed growth per sample: `(last − first) / len`.
    pub diffusion_rate: f32,
}

impl FitMetrics {
    /// Compute metrics from simulated samples. An empty series yields all zeros.
    pub fn from_samples(samples: &[SamplePoint]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let n = samples.len() as f64;

        let squared: f64 = samples.iter().map(|s| (s.error as f64).powi(2)).sum();
        let rmse = (squared / n).sqrt();

        let accurate = samples
            .iter()
            .filter(|s| s.error.abs() < ACCURACY_TOLERANCE)
            .count();
        let predictive_accuracy = accurate as f64 / n * 100.0;

        let diffusion_rate = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) if samples.len() > 1 => {
                (last.observed - first.observed) as f64 / n
            }
            _ => 0.0,
        };

        Self {
            rmse: rmse as f32,
            correlation: (pearson(samples) * 100.0) as f32,
            predictive_accuracy: predictive_accuracy as f32,
            diffusion_rate: diffusion_rate as f32,
        }
    }
}

/// Pearson correlation of observed vs predicted. Zero when either side is constant.
fn pearson(samples: &[SamplePoint]) -> f64 {
    let n = samples.len() as f64;
    let observed_mean = samples.iter().map(|s| s.observed as f64).sum::<f64>() / n;
    let predicted_mean = samples.iter().map(|s| s.predicted as f64).sum::<f64>() / n;

    let mut covariance = 0.0f64;
    let mut observed_var = 0.0f64;
    let mut predicted_var = 0.0f64;
    for s in samples {
        let dobs = s.observed as f64 - observed_mean;
        let dpred = s.predicted as f64 - predicted_mean;
        covariance += dobs * dpred;
        observed_var += dobs * dobs;
        predicted_var += dpred * dpred;
    }

    let denominator = (observed_var * predicted_var).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        covariance / denominator
    }
}
