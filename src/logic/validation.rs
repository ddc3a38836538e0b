use crate::models::{
    Parameter, ParameterMap, Priority, Recommendation, RecommendationKind, TestType, DATA_QUALITY,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Physically plausible bounds for one parameter. Used to reject entry errors,
/// never to drive agronomic advice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationRange {
    pub min: f64,
    pub max: f64,
}

impl ValidationRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

const SOIL_RANGES: &[(Parameter, ValidationRange)] = &[
    (Parameter::Ph, ValidationRange::new(0.0, 14.0)),
    (Parameter::Ec, ValidationRange::new(0.0, 20.0)),
    (Parameter::OrganicCarbon, ValidationRange::new(0.0, 10.0)),
    (Parameter::Nitrogen, ValidationRange::new(0.0, 2000.0)),
    (Parameter::Phosphorus, ValidationRange::new(0.0, 500.0)),
    (Parameter::Potassium, ValidationRange::new(0.0, 3000.0)),
    (Parameter::Calcium, ValidationRange::new(0.0, 20000.0)),
    (Parameter::Magnesium, ValidationRange::new(0.0, 5000.0)),
    (Parameter::Sulfur, ValidationRange::new(0.0, 500.0)),
    (Parameter::Zinc, ValidationRange::new(0.0, 100.0)),
    (Parameter::Iron, ValidationRange::new(0.0, 500.0)),
    (Parameter::Manganese, ValidationRange::new(0.0, 500.0)),
    (Parameter::Copper, ValidationRange::new(0.0, 100.0)),
    (Parameter::Boron, ValidationRange::new(0.0, 20.0)),
    (Parameter::Sodium, ValidationRange::new(0.0, 10000.0)),
    (Parameter::Chloride, ValidationRange::new(0.0, 100.0)),
    (Parameter::Bicarbonate, ValidationRange::new(0.0, 50.0)),
    (Parameter::Carbonate, ValidationRange::new(0.0, 50.0)),
];

const PETIOLE_RANGES: &[(Parameter, ValidationRange)] = &[
    (Parameter::Nitrogen, ValidationRange::new(0.0, 6.0)),
    (Parameter::Phosphorus, ValidationRange::new(0.0, 2.0)),
    (Parameter::Potassium, ValidationRange::new(0.0, 6.0)),
    (Parameter::Calcium, ValidationRange::new(0.0, 5.0)),
    (Parameter::Magnesium, ValidationRange::new(0.0, 2.0)),
    (Parameter::Sulfur, ValidationRange::new(0.0, 1.5)),
    (Parameter::Zinc, ValidationRange::new(0.0, 500.0)),
    (Parameter::Iron, ValidationRange::new(0.0, 1000.0)),
    (Parameter::Manganese, ValidationRange::new(0.0, 1000.0)),
    (Parameter::Copper, ValidationRange::new(0.0, 500.0)),
    (Parameter::Boron, ValidationRange::new(0.0, 500.0)),
    (Parameter::Sodium, ValidationRange::new(0.0, 2.0)),
    (Parameter::Chloride, ValidationRange::new(0.0, 3.0)),
];

/// One fixed range table per test type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationTable {
    soil: BTreeMap<Parameter, ValidationRange>,
    petiole: BTreeMap<Parameter, ValidationRange>,
}

impl ValidationTable {
    pub fn range(&self, test_type: TestType, parameter: Parameter) -> Option<ValidationRange> {
        self.table(test_type).get(&parameter).copied()
    }

    pub fn ranges(&self, test_type: TestType) -> impl Iterator<Item = (Parameter, ValidationRange)> + '_ {
        self.table(test_type).iter().map(|(p, r)| (*p, *r))
    }

    /// Replace the range for one parameter, returning the updated table.
    pub fn with_range(
        mut self,
        test_type: TestType,
        parameter: Parameter,
        range: ValidationRange,
    ) -> Self {
        match test_type {
            TestType::Soil => self.soil.insert(parameter, range),
            TestType::Petiole => self.petiole.insert(parameter, range),
        };
        self
    }

    /// Canonical keys of parameters outside their plausible range.
    ///
    /// Parameters without a range entry are not checked.
    pub fn validate(&self, test_type: TestType, parameters: &ParameterMap) -> Vec<String> {
        parameters
            .iter()
            .filter(|pv| {
                self.range(test_type, pv.parameter)
                    .is_some_and(|range| !range.contains(pv.value))
            })
            .map(|pv| pv.parameter.key().to_string())
            .collect()
    }

    fn table(&self, test_type: TestType) -> &BTreeMap<Parameter, ValidationRange> {
        match test_type {
            TestType::Soil => &self.soil,
            TestType::Petiole => &self.petiole,
        }
    }
}

impl Default for ValidationTable {
    fn default() -> Self {
        Self {
            soil: SOIL_RANGES.iter().copied().collect(),
            petiole: PETIOLE_RANGES.iter().copied().collect(),
        }
    }
}

/// The single recommendation returned in place of agronomic advice when validation fails.
pub fn data_quality_recommendation(offending: &[String]) -> Recommendation {
    Recommendation::new(
        Priority::Critical,
        RecommendationKind::Action,
        DATA_QUALITY,
        format!(
            "Out-of-range values detected for: {}. These readings are outside physically \
             plausible limits and are most likely data-entry or unit errors. No agronomic \
             recommendations were generated.",
            offending.join(", ")
        ),
        "Some lab values look wrong. Please re-check the report and enter the values again.",
    )
}

/// Returned when a record holds nothing the rule set for its test type can assess.
pub fn no_findings_recommendation(test_type: TestType) -> Recommendation {
    Recommendation::new(
        Priority::Low,
        RecommendationKind::Watch,
        DATA_QUALITY,
        format!(
            "No recognized {} test parameters were supplied, so no assessment was made.",
            test_type
        ),
        "We could not find any values to check. Please make sure the lab report was entered.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soil(pairs: &[(Parameter, f64)]) -> ParameterMap {
        ParameterMap::try_from(pairs).unwrap()
    }

    #[test]
    fn every_parameter_has_a_soil_range() {
        let table = ValidationTable::default();
        for parameter in Parameter::all() {
            assert!(
                table.range(TestType::Soil, *parameter).is_some(),
                "missing soil range for {:?}",
                parameter
            );
        }
    }

    #[test]
    fn validate_flags_out_of_range_values() {
        let table = ValidationTable::default();
        let params = soil(&[
            (Parameter::Ph, 400.0),
            (Parameter::Nitrogen, 300.0),
            (Parameter::Zinc, -0.5),
        ]);
        assert_eq!(
            table.validate(TestType::Soil, &params),
            vec!["ph".to_string(), "zinc".to_string()]
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let table = ValidationTable::default();
        let params = soil(&[(Parameter::Ph, 14.0), (Parameter::Ec, 0.0)]);
        assert!(table.validate(TestType::Soil, &params).is_empty());
    }

    #[test]
    fn ranges_differ_by_test_type() {
        let table = ValidationTable::default();
        let params = soil(&[(Parameter::Nitrogen, 300.0)]);
        assert!(table.validate(TestType::Soil, &params).is_empty());
        assert_eq!(table.validate(TestType::Petiole, &params), vec!["nitrogen"]);
    }

    #[test]
    fn with_range_overrides_default() {
        let table = ValidationTable::default().with_range(
            TestType::Soil,
            Parameter::Ph,
            ValidationRange::new(3.0, 10.0),
        );
        let params = soil(&[(Parameter::Ph, 11.0)]);
        assert_eq!(table.validate(TestType::Soil, &params), vec!["ph"]);
    }

    #[test]
    fn no_findings_is_informational() {
        let rec = no_findings_recommendation(TestType::Petiole);
        assert_eq!(rec.priority, Priority::Low);
        assert!(!rec.is_urgent_action());
        assert!(rec.is_data_quality());
        assert!(rec.technical.contains("petiole"));
    }

    #[test]
    fn data_quality_names_offenders() {
        let rec = data_quality_recommendation(&["ph".to_string(), "boron".to_string()]);
        assert_eq!(rec.priority, Priority::Critical);
        assert_eq!(rec.kind, RecommendationKind::Action);
        assert_eq!(rec.parameter, DATA_QUALITY);
        assert!(rec.technical.contains("ph, boron"));
    }
}
