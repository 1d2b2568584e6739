//! Per-criterion weight and impact vectors.
//!
//! Both vectors are positional: entry `i` applies to criterion column `i`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::Impact;

use super::TopsisError;

/// Relative importance of each criterion.
///
/// Entries are finite and non-negative. They are not assumed to sum to one;
/// use [`WeightVector::normalized`] to obtain the rescaled weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Creates a weight vector.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeight` for a negative, NaN or infinite entry.
    pub fn new(weights: Vec<f64>) -> Result<Self, TopsisError> {
        if let Some(i) = weights.iter().position(|w| !w.is_finite() || *w < 0.0) {
            return Err(TopsisError::invalid_weight(i + 1, weights[i].to_string()));
        }
        Ok(Self(weights))
    }

    /// Returns the number of weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns a copy of the weights multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Result<Self, TopsisError> {
        Self::new(self.0.iter().map(|w| w * factor).collect())
    }

    /// Rescales the weights so they sum to one.
    ///
    /// Multiplying every weight by a power of two yields bit-identical output.
    /// Any other positive factor agrees to within a few ulps, so scores match
    /// to about 1e-15 and ranks match except between alternatives whose
    /// scores already differ by less than that. Exact ties between identical
    /// rows are always preserved.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateWeights` when every weight is zero (or there are none).
    pub fn normalized(&self) -> Result<Vec<f64>, TopsisError> {
        // Dividing by the largest weight first keeps the sum finite.
        let largest = self.0.iter().copied().fold(0.0_f64, f64::max);
        if largest == 0.0 {
            return Err(TopsisError::DegenerateWeights);
        }

        let scaled: Vec<f64> = self.0.iter().map(|w| w / largest).collect();
        let total: f64 = scaled.iter().sum();
        Ok(scaled.into_iter().map(|w| w / total).collect())
    }
}

impl FromStr for WeightVector {
    type Err = TopsisError;

    /// Parses a comma-separated list such as `"1, 1, 2, 0.5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let weights = s
            .split(',')
            .enumerate()
            .map(|(i, raw)| {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| TopsisError::invalid_weight(i + 1, raw.trim()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(weights)
    }
}

impl<'de> Deserialize<'de> for WeightVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let weights = Vec::<f64>::deserialize(deserializer)?;
        WeightVector::new(weights).map_err(serde::de::Error::custom)
    }
}

/// Preference direction of each criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactVector(Vec<Impact>);

impl ImpactVector {
    /// Creates an impact vector.
    pub fn new(impacts: Vec<Impact>) -> Self {
        Self(impacts)
    }

    /// Returns the number of impacts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no impacts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the impacts.
    pub fn as_slice(&self) -> &[Impact] {
        &self.0
    }

    /// Returns a copy with the impact at `criterion` reversed.
    pub fn with_flipped(&self, criterion: usize) -> Self {
        let mut impacts = self.0.clone();
        if let Some(impact) = impacts.get_mut(criterion) {
            *impact = impact.flipped();
        }
        Self(impacts)
    }
}

impl FromStr for ImpactVector {
    type Err = TopsisError;

    /// Parses a comma-separated list such as `"+,+,-,+"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let impacts = s
            .split(',')
            .enumerate()
            .map(|(i, raw)| {
                Impact::parse(raw).map_err(|_| TopsisError::invalid_impact(i + 1, raw.trim()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(impacts))
    }
}

impl From<Vec<Impact>> for ImpactVector {
    fn from(impacts: Vec<Impact>) -> Self {
        Self::new(impacts)
    }
}
