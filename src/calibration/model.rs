//! Zero-dimensional mean-field model of knowledge adoption.

use serde::{Deserialize, Serialize};

/// Time step between consecutive observations.
pub const MODEL_DT: f32 = 1.0;

/// Observations are percentages; the model works on unit densities.
pub const PERCENT_SCALE: f32 = 100.0;

/// Rates of `dρ/dt = D·ρ·(1−ρ) + σ − μ·ρ`.
///
/// Without space, diffusion collapses to logistic spread: adoption grows with
/// contact between those who know (ρ) and those who do not (1−ρ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanFieldParams {
    /// Spread rate D.
    #[serde(alias = "D")]
    pub diffusion: f32,
    /// Creation rate σ.
    #[serde(alias = "sigma")]
    pub creation: f32,
    /// Dissipation rate μ.
    #[serde(alias = "mu")]
    pub dissipation: f32,
}

impl MeanFieldParams {
    pub const fn new(diffusion: f32, creation: f32, dissipation: f32) -> Self {
        Self {
            diffusion,
            creation,
            dissipation,
        }
    }

    /// One explicit step from `rho`, clamped to `[0, 1]`.
    #[inline]
    pub fn step(&self, rho: f32) -> f32 {
        let spread = self.diffusion * rho * (1.0 - rho);
        let dissipation = self.dissipation * rho;
        (rho + MODEL_DT * (spread + self.creation - dissipation)).clamp(0.0, 1.0)
    }
}

/// One labelled observation, as a percentage of saturation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: String,
    pub observed: f32,
}

impl Observation {
    pub fn new(label: impl Into<String>, observed: f32) -> Self {
        Self {
            label: label.into(),
            observed,
        }
    }
}

/// Observation paired with the model's prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub label: String,
    pub observed: f32,
    pub predicted: f32,
    /// Absolute error in percentage points.
    pub error: f32,
}

/// Run the model alongside `observations`.
///
/// The model starts from the first observation and takes one step per
/// subsequent sample.
pub fn simulate(observations: &[Observation], params: &MeanFieldParams) -> Vec<SamplePoint> {
    let Some(first) = observations.first() else {
        return Vec::new();
    };
    let mut rho = first.observed / PERCENT_SCALE;

    observations
        .iter()
        .enumerate()
        .map(|(i, obs)| {
            if i > 0 {
                rho = params.step(rho);
            }
            let predicted = rho * PERCENT_SCALE;
            SamplePoint {
                label: obs.label.clone(),
                observed: obs.observed,
                predicted,
                error: (obs.observed - predicted).abs(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_matches_observation() {
        let obs = vec![Observation::new("a", 40.0), Observation::new("b", 50.0)];
        let samples = simulate(&obs, &MeanFieldParams::new(0.5, 0.0, 0.0));

        assert_eq!(samples.len(), 2);
        assert!((samples[0].predicted - 40.0).abs() < 1e-4);
        assert!(samples[0].error < 1e-4);
        // 0.4 + 0.5 * 0.4 * 0.6 = 0.52
        assert!((samples[1].predicted - 52.0).abs() < 1e-4);
        assert!((samples[1].error - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_step_is_clamped() {
        let params = MeanFieldParams::new(1.0, 0.5, 0.0);
        assert_eq!(params.step(0.9), 1.0);

        let params = MeanFieldParams::new(0.0, 0.0, 2.0);
        assert_eq!(params.step(0.9), 0.0);
    }

    #[test]
    fn test_empty_series() {
        assert!(simulate(&[], &MeanFieldParams::new(0.5, 0.05, 0.01)).is_empty());
    }

    #[test]
    fn test_deserialize_short_names() {
        let json = r#"{"D":0.85,"sigma":0.06,"mu":0.015}"#;
        let params: MeanFieldParams = serde_json::from_str(json).unwrap();
        assert_eq!(params, MeanFieldParams::new(0.85, 0.06, 0.015));
    }
}
