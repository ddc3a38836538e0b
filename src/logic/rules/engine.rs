use super::{petiole, soil, Rule, RuleContext};
use crate::logic::dosage::DosageTable;
use crate::models::{Parameter, ParameterMap, Recommendation, TestType};

/// Ordered rule set for one test type. Emission order is rule order.
pub struct RulesEngine {
    test_type: TestType,
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new(test_type: TestType) -> Self {
        let rules = match test_type {
            TestType::Soil => soil::rules(),
            TestType::Petiole => petiole::rules(),
        };

        Self { test_type, rules }
    }

    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    /// Unsorted recommendations, one per present parameter that has a rule.
    pub fn evaluate(&self, parameters: &ParameterMap, remedies: &DosageTable) -> Vec<Recommendation> {
        let ctx = RuleContext::new(parameters, remedies);
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(&ctx))
            .collect()
    }

    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        parameters: &ParameterMap,
        remedies: &DosageTable,
    ) -> Option<Recommendation> {
        let ctx = RuleContext::new(parameters, remedies);
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(&ctx))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, Parameter)> {
        self.rules.iter().map(|r| (r.id(), r.parameter())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_ids_are_unique() {
        for test_type in [TestType::Soil, TestType::Petiole] {
            let engine = RulesEngine::new(test_type);
            let mut ids: Vec<&str> = engine.list_rules().iter().map(|(id, _)| *id).collect();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), total);
        }
    }

    #[test]
    fn one_rule_per_parameter() {
        for test_type in [TestType::Soil, TestType::Petiole] {
            let engine = RulesEngine::new(test_type);
            let mut params: Vec<Parameter> =
                engine.list_rules().iter().map(|(_, p)| *p).collect();
            let total = params.len();
            params.sort();
            params.dedup();
            assert_eq!(params.len(), total);
        }
    }

    #[test]
    fn emission_follows_rule_order() {
        let engine = RulesEngine::new(TestType::Soil);
        let params = ParameterMap::new()
            .with(Parameter::Zinc, 2.0)
            .unwrap()
            .with(Parameter::Ph, 7.0)
            .unwrap();
        let recs = engine.evaluate(&params, &DosageTable::default());
        let names: Vec<&str> = recs.iter().map(|r| r.parameter.as_str()).collect();
        assert_eq!(names, vec!["pH", "Zinc"]);
    }

    #[test]
    fn evaluate_single_rule() {
        let engine = RulesEngine::new(TestType::Soil);
        let params = ParameterMap::new().with(Parameter::Ph, 5.2).unwrap();
        let table = DosageTable::default();
        assert!(engine.evaluate_rule("soil_ph", &params, &table).is_some());
        assert!(engine.evaluate_rule("soil_zinc", &params, &table).is_none());
        assert!(engine.evaluate_rule("missing", &params, &table).is_none());
    }
}
