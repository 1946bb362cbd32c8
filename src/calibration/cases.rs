//! Built-in case studies of real-world knowledge diffusion.

use serde::{Deserialize, Serialize};

use super::{FitMetrics, MeanFieldParams, Observation, SamplePoint, simulate};

/// An observed adoption series with the rates fitted to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    /// Short lookup key, e.g. `covid19`.
    pub key: String,
    pub name: String,
    pub description: String,
    pub params: MeanFieldParams,
    pub observations: Vec<Observation>,
}

/// Simulated series and its metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub key: String,
    pub samples: Vec<SamplePoint>,
    pub metrics: FitMetrics,
}

fn series(labels: &[&str], values: &[f32]) -> Vec<Observation> {
    labels
        .iter()
        .zip(values)
        .map(|(label, &value)| Observation::new(*label, value))
        .collect()
}

impl CaseStudy {
    /// The four reference cases, in display order.
    pub fn builtin() -> Vec<CaseStudy> {
        vec![
            CaseStudy {
                key: "covid19".into(),
                name: "COVID-19 (2020)".into(),
                description: "Spread of knowledge about the pandemic".into(),
                params: MeanFieldParams::new(0.85, 0.06, 0.015),
                observations: series(
                    &[
                        "Jan/20", "Feb/20", "Mar/20", "Apr/20", "May/20", "Jun/20", "Jul/20",
                        "Aug/20", "Sep/20", "Oct/20", "Nov/20", "Dec/20",
                    ],
                    &[5.0, 8.0, 85.0, 100.0, 95.0, 75.0, 70.0, 68.0, 72.0, 78.0, 82.0, 80.0],
                ),
            },
            CaseStudy {
                key: "deeplearning".into(),
                name: "Deep Learning (2012-2024)".into(),
                description: "Adoption of deep learning techniques".into(),
                params: MeanFieldParams::new(0.45, 0.04, 0.008),
                observations: series(
                    &[
                        "2012", "2013", "2014", "2015", "2016", "2017", "2018", "2019", "2020",
                        "2021", "2022", "2023",
                    ],
                    &[10.0, 15.0, 22.0, 32.0, 45.0, 58.0, 72.0, 82.0, 88.0, 92.0, 95.0, 97.0],
                ),
            },
            CaseStudy {
                key: "bitcoin".into(),
                name: "Bitcoin (2009-2024)".into(),
                description: "Knowledge about cryptocurrencies".into(),
                params: MeanFieldParams::new(0.55, 0.05, 0.012),
                observations: series(
                    &["2009", "2011", "2013", "2015", "2017", "2019", "2021", "2023"],
                    &[2.0, 8.0, 35.0, 25.0, 85.0, 45.0, 100.0, 60.0],
                ),
            },
            CaseStudy {
                key: "climatechange".into(),
                name: "Climate Change (1990-2024)".into(),
                description: "Awareness of global warming".into(),
                params: MeanFieldParams::new(0.35, 0.025, 0.006),
                observations: series(
                    &["1990", "1995", "2000", "2005", "2010", "2015", "2020", "2024"],
                    &[15.0, 20.0, 25.0, 32.0, 45.0, 62.0, 78.0, 85.0],
                ),
            },
        ]
    }

    /// Look up a built-in case by key.
    pub fn find(key: &str) -> Option<CaseStudy> {
        Self::builtin().into_iter().find(|c| c.key == key)
    }

    /// Simulate with the case's own rates.
    pub fn evaluate(&self) -> CaseReport {
        self.evaluate_with(&self.params)
    }

    /// Simulate with substitute rates.
    pub fn evaluate_with(&self, params: &MeanFieldParams) -> CaseReport {
        let samples = simulate(&self.observations, params);
        let metrics = FitMetrics::from_samples(&samples);
        CaseReport {
            key: self.key.clone(),
            samples,
            metrics,
        }
    }
}
