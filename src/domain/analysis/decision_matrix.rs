//! Decision Matrix - Alternatives (rows) scored on criteria (columns).

use serde::{Deserialize, Serialize};

use super::TopsisError;

/// A row of the decision matrix: the entity being ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// Opaque label from the first column; never used arithmetically.
    pub id: String,
    /// One value per criterion, in criterion order.
    pub values: Vec<f64>,
}

impl Alternative {
    /// Creates a new alternative.
    pub fn new(id: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }
}

/// Rectangular table of finite criterion values.
///
/// Construction guarantees at least one alternative, at least one criterion,
/// every row having one value per criterion, and every value finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionMatrix {
    id_header: String,
    criteria: Vec<String>,
    alternatives: Vec<Alternative>,
}

impl DecisionMatrix {
    /// Creates a validated decision matrix.
    ///
    /// # Errors
    ///
    /// - `EmptyMatrix` when there are no alternatives or no criteria
    /// - `ShapeMismatch` when a row has the wrong number of values
    /// - `NonFiniteValue` when any value is NaN or infinite
    pub fn new(
        id_header: impl Into<String>,
        criteria: Vec<String>,
        alternatives: Vec<Alternative>,
    ) -> Result<Self, TopsisError> {
        let matrix = Self {
            id_header: id_header.into(),
            criteria,
            alternatives,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Creates a builder for constructing a decision matrix.
    pub fn builder() -> DecisionMatrixBuilder {
        DecisionMatrixBuilder::new()
    }

    /// Re-checks the structural invariants.
    pub fn validate(&self) -> Result<(), TopsisError> {
        if self.alternatives.is_empty() || self.criteria.is_empty() {
            return Err(TopsisError::EmptyMatrix);
        }

        for alternative in &self.alternatives {
            if alternative.values.len() != self.criteria.len() {
                return Err(TopsisError::shape_mismatch(
                    format!("alternative '{}'", alternative.id),
                    self.criteria.len(),
                    alternative.values.len(),
                ));
            }

            if let Some(c) = alternative.values.iter().position(|v| !v.is_finite()) {
                return Err(TopsisError::non_finite(
                    alternative.id.clone(),
                    self.criteria[c].clone(),
                ));
            }
        }

        Ok(())
    }

    /// Header of the identifier column.
    pub fn id_header(&self) -> &str {
        &self.id_header
    }

    /// Criterion names, in column order.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Alternatives, in row order.
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Returns the number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Returns the number of criteria.
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Iterates over the values of one criterion column.
    pub fn column(&self, criterion: usize) -> impl Iterator<Item = f64> + Clone + '_ {
        self.alternatives.iter().map(move |a| a.values[criterion])
    }
}

impl<'de> Deserialize<'de> for DecisionMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            id_header: String,
            criteria: Vec<String>,
            alternatives: Vec<Alternative>,
        }

        let raw = Raw::deserialize(deserializer)?;
        DecisionMatrix::new(raw.id_header, raw.criteria, raw.alternatives)
            .map_err(serde::de::Error::custom)
    }
}

/// Builder for constructing DecisionMatrix instances.
#[derive(Debug)]
pub struct DecisionMatrixBuilder {
    id_header: String,
    criteria: Vec<String>,
    alternatives: Vec<Alternative>,
}

impl Default for DecisionMatrixBuilder {
    fn default() -> Self {
        Self {
            id_header: "Alternative".to_string(),
            criteria: Vec::new(),
            alternatives: Vec::new(),
        }
    }
}

impl DecisionMatrixBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier column header.
    pub fn id_header(mut self, header: impl Into<String>) -> Self {
        self.id_header = header.into();
        self
    }

    /// Sets the criteria.
    pub fn criteria(mut self, names: Vec<impl Into<String>>) -> Self {
        self.criteria = names.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Adds an alternative.
    pub fn alternative(mut self, id: impl Into<String>, values: Vec<f64>) -> Self {
        self.alternatives.push(Alternative::new(id, values));
        self
    }

    /// Builds and validates the decision matrix.
    pub fn build(self) -> Result<DecisionMatrix, TopsisError> {
        DecisionMatrix::new(self.id_header, self.criteria, self.alternatives)
    }
}
