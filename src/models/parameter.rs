use crate::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TestType;

/// Canonical lab parameter vocabulary shared by soil and petiole reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Ph,
    Ec,
    OrganicCarbon,
    Nitrogen,
    Phosphorus,
    Potassium,
    Calcium,
    Magnesium,
    Sulfur,
    Zinc,
    Iron,
    Manganese,
    Copper,
    Boron,
    Sodium,
    Chloride,
    Bicarbonate,
    Carbonate,
}

impl Parameter {
    /// Canonical snake_case key, as used in serialized records.
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::Ph => "ph",
            Parameter::Ec => "ec",
            Parameter::OrganicCarbon => "organic_carbon",
            Parameter::Nitrogen => "nitrogen",
            Parameter::Phosphorus => "phosphorus",
            Parameter::Potassium => "potassium",
            Parameter::Calcium => "calcium",
            Parameter::Magnesium => "magnesium",
            Parameter::Sulfur => "sulfur",
            Parameter::Zinc => "zinc",
            Parameter::Iron => "iron",
            Parameter::Manganese => "manganese",
            Parameter::Copper => "copper",
            Parameter::Boron => "boron",
            Parameter::Sodium => "sodium",
            Parameter::Chloride => "chloride",
            Parameter::Bicarbonate => "bicarbonate",
            Parameter::Carbonate => "carbonate",
        }
    }

    /// Display label used as the `parameter` of a recommendation.
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Ph => "pH",
            Parameter::Ec => "EC",
            Parameter::OrganicCarbon => "Organic Carbon",
            Parameter::Nitrogen => "Nitrogen",
            Parameter::Phosphorus => "Phosphorus",
            Parameter::Potassium => "Potassium",
            Parameter::Calcium => "Calcium",
            Parameter::Magnesium => "Magnesium",
            Parameter::Sulfur => "Sulfur",
            Parameter::Zinc => "Zinc",
            Parameter::Iron => "Iron",
            Parameter::Manganese => "Manganese",
            Parameter::Copper => "Copper",
            Parameter::Boron => "Boron",
            Parameter::Sodium => "Sodium",
            Parameter::Chloride => "Chloride",
            Parameter::Bicarbonate => "Bicarbonate",
            Parameter::Carbonate => "Carbonate",
        }
    }

    /// Unit implied by the vocabulary entry for a given test type.
    pub fn unit(&self, test_type: TestType) -> &'static str {
        match (test_type, self) {
            (_, Parameter::Ph) => "",
            (_, Parameter::Ec) => "dS/m",
            (_, Parameter::OrganicCarbon) => "%",
            (_, Parameter::Bicarbonate | Parameter::Carbonate) => "meq/L",
            (TestType::Soil, Parameter::Nitrogen) => "kg/ha",
            (TestType::Soil, Parameter::Chloride) => "meq/L",
            (TestType::Soil, _) => "ppm",
            (
                TestType::Petiole,
                Parameter::Nitrogen
                | Parameter::Phosphorus
                | Parameter::Potassium
                | Parameter::Calcium
                | Parameter::Magnesium
                | Parameter::Sulfur
                | Parameter::Sodium
                | Parameter::Chloride,
            ) => "%",
            (TestType::Petiole, _) => "ppm",
        }
    }

    pub fn all() -> &'static [Parameter] {
        &[
            Parameter::Ph,
            Parameter::Ec,
            Parameter::OrganicCarbon,
            Parameter::Nitrogen,
            Parameter::Phosphorus,
            Parameter::Potassium,
            Parameter::Calcium,
            Parameter::Magnesium,
            Parameter::Sulfur,
            Parameter::Zinc,
            Parameter::Iron,
            Parameter::Manganese,
            Parameter::Copper,
            Parameter::Boron,
            Parameter::Sodium,
            Parameter::Chloride,
            Parameter::Bicarbonate,
            Parameter::Carbonate,
        ]
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A canonical parameter paired with a finite measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterValue {
    pub parameter: Parameter,
    pub value: f64,
}

/// Enum-keyed map of finite measurements. Absent parameters are simply not present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Parameter, f64>",
    into = "BTreeMap<Parameter, f64>"
)]
pub struct ParameterMap(BTreeMap<Parameter, f64>);

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a measurement. Non-finite values are a caller bug, not a data issue.
    pub fn insert(&mut self, parameter: Parameter, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(LabError::NonFiniteValue {
                parameter: parameter.key().to_string(),
                value,
            });
        }
        self.0.insert(parameter, value);
        Ok(())
    }

    pub fn with(mut self, parameter: Parameter, value: f64) -> Result<Self> {
        self.insert(parameter, value)?;
        Ok(self)
    }

    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        self.0.get(&parameter).copied()
    }

    pub fn contains(&self, parameter: Parameter) -> bool {
        self.0.contains_key(&parameter)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ParameterValue> + '_ {
        self.0.iter().map(|(parameter, value)| ParameterValue {
            parameter: *parameter,
            value: *value,
        })
    }
}

impl TryFrom<&[(Parameter, f64)]> for ParameterMap {
    type Error = LabError;

    fn try_from(pairs: &[(Parameter, f64)]) -> Result<Self> {
        let mut map = ParameterMap::new();
        for (parameter, value) in pairs {
            map.insert(*parameter, *value)?;
        }
        Ok(map)
    }
}

impl TryFrom<BTreeMap<Parameter, f64>> for ParameterMap {
    type Error = LabError;

    fn try_from(values: BTreeMap<Parameter, f64>) -> Result<Self> {
        let mut map = ParameterMap::new();
        for (parameter, value) in values {
            map.insert(parameter, value)?;
        }
        Ok(map)
    }
}

impl From<ParameterMap> for BTreeMap<Parameter, f64> {
    fn from(map: ParameterMap) -> Self {
        map.0
    }
}
