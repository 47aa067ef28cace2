use serde::Deserialize;

use super::Scaler;

/// On-disk scaler description, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerSpec {
    /// `(x - mean) / scale`, as fitted by a standard scaler.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`, as fitted by a min-max scaler.
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    Identity,
}

impl ScalerSpec {
    /// Number of features the scaler was fitted on; `None` for identity.
    pub fn n_features(&self) -> Option<usize> {
        match self {
            ScalerSpec::Standard { mean, .. } => Some(mean.len()),
            ScalerSpec::MinMax { min, .. } => Some(min.len()),
            ScalerSpec::Identity => None,
        }
    }

    /// True when the offset and scale vectors agree in length.
    pub fn is_consistent(&self) -> bool {
        match self {
            ScalerSpec::Standard { mean, scale } => mean.len() == scale.len(),
            ScalerSpec::MinMax { min, scale } => min.len() == scale.len(),
            ScalerSpec::Identity => true,
        }
    }

    pub fn into_scaler(self) -> Box<dyn Scaler> {
        match self {
            ScalerSpec::Standard { mean, scale } => Box::new(StandardScaler::new(mean, scale)),
            ScalerSpec::MinMax { min, scale } => Box::new(MinMaxScaler { min, scale }),
            ScalerSpec::Identity => Box::new(IdentityScaler),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Zero scales (constant training columns) are treated as 1.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();
        Self { mean, scale }
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    scale: Vec<f64>,
}

impl Scaler for MinMaxScaler {
    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(x, (m, s))| x * s + m)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityScaler;

impl Scaler for IdentityScaler {
    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.to_vec()
    }
}
