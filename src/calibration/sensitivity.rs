//! One-at-a-time parameter sensitivity sweeps.

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use super::{CaseStudy, FitMetrics, MeanFieldParams};

/// Which rate a sweep point varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweptParameter {
    Diffusion,
    Creation,
    Dissipation,
}

impl SweptParameter {
    /// Symbol used in reports.
    pub fn symbol(&self) -> &'static str {
        match self {
            SweptParameter::Diffusion => "D",
            SweptParameter::Creation => "σ",
            SweptParameter::Dissipation => "μ",
        }
    }

    fn apply(&self, base: &MeanFieldParams, value: f32) -> MeanFieldParams {
        let mut params = *base;
        match self {
            SweptParameter::Diffusion => params.diffusion = value,
            SweptParameter::Creation => params.creation = value,
            SweptParameter::Dissipation => params.dissipation = value,
        }
        params
    }
}

/// Values to try for each rate. The other two stay at the case's own values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub diffusion: Vec<f32>,
    pub creation: Vec<f32>,
    pub dissipation: Vec<f32>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            diffusion: vec![0.2, 0.5, 0.8],
            creation: vec![0.02, 0.05, 0.08],
            dissipation: vec![0.01, 0.02],
        }
    }
}

/// Metrics for one swept value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub parameter: SweptParameter,
    pub value: f32,
    pub metrics: FitMetrics,
}

/// Evaluate `case` at every value in `config`, in config order.
pub fn sweep(case: &CaseStudy, config: &SweepConfig) -> Vec<SensitivityPoint> {
    let jobs: Vec<(SweptParameter, f32)> = [
        (SweptParameter::Diffusion, &config.diffusion),
        (SweptParameter::Creation, &config.creation),
        (SweptParameter::Dissipation, &config.dissipation),
    ]
    .into_iter()
    .flat_map(|(parameter, values)| values.iter().map(move |&v| (parameter, v)))
    .collect();

    let evaluate = |&(parameter, value): &(SweptParameter, f32)| {
        let params = parameter.apply(&case.params, value);
        SensitivityPoint {
            parameter,
            value,
            metrics: case.evaluate_with(&params).metrics,
        }
    };

    #[cfg(not(target_arch = "wasm32"))]
    let points: Vec<SensitivityPoint> = jobs.par_iter().map(evaluate).collect();
    #[cfg(target_arch = "wasm32")]
    let points: Vec<SensitivityPoint> = jobs.iter().map(evaluate).collect();

    log::debug!("Swept {} points for case {}", jobs.len(), case.key);
    points
}
