use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ParameterMap;
use crate::logic::normalize::{normalize_parameters, NormalizationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Soil,
    Petiole,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Soil => "soil",
            TestType::Petiole => "petiole",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "soil" => Some(TestType::Soil),
            "petiole" | "tissue" | "leaf" => Some(TestType::Petiole),
            _ => None,
        }
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lab value as it appears on a report: either a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// One lab result. Read-only once recommendations have been generated from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub test_type: TestType,
    pub farm_id: String,
    pub date: NaiveDate,
    pub parameters: ParameterMap,
}

impl TestRecord {
    pub fn new(
        test_type: TestType,
        farm_id: impl Into<String>,
        date: NaiveDate,
        parameters: ParameterMap,
    ) -> Self {
        Self {
            test_type,
            farm_id: farm_id.into(),
            date,
            parameters,
        }
    }

    /// Build a record from raw report keys and values, normalizing both.
    pub fn from_raw<K, V, I>(
        test_type: TestType,
        farm_id: impl Into<String>,
        date: NaiveDate,
        raw: I,
    ) -> (Self, NormalizationReport)
    where
        K: AsRef<str>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let (parameters, report) = normalize_parameters(raw);
        (Self::new(test_type, farm_id, date, parameters), report)
    }
}

/// On-disk shape of a lab record before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTestRecord {
    pub test_type: String,
    #[serde(default)]
    pub farm_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub parameters: BTreeMap<String, RawValue>,
}

impl RawTestRecord {
    pub fn into_record(self) -> crate::error::Result<(TestRecord, NormalizationReport)> {
        let test_type = TestType::from_str(&self.test_type).ok_or_else(|| {
            crate::error::LabError::InvalidData(format!(
                "unknown test type '{}' (expected soil or petiole)",
                self.test_type
            ))
        })?;

        Ok(TestRecord::from_raw(
            test_type,
            self.farm_id,
            self.date,
            self.parameters,
        ))
    }
}
