use chrono::NaiveDate;
use serde::Serialize;
use std::sync::OnceLock;

use super::dosage::DosageTable;
use super::plan::{build_plan, PlanSettings};
use super::priority::sort_by_priority;
use super::reminders::{self, ReminderIntervals, TestReminders};
use super::rules::RulesEngine;
use super::validation::{data_quality_recommendation, no_findings_recommendation, ValidationTable};
use crate::models::{FertilizerPlanItem, ParameterMap, Recommendation, TestRecord, TestType};

/// Immutable tables the engine is built from.
#[derive(Debug, Clone, Default)]
pub struct EngineTables {
    pub validation: ValidationTable,
    pub remedies: DosageTable,
    pub reminders: ReminderIntervals,
    pub plan: PlanSettings,
}

/// Result of running a record through the full pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub recommendations: Vec<Recommendation>,
    pub plan: Vec<FertilizerPlanItem>,
}

pub struct LabEngine {
    tables: EngineTables,
    soil: RulesEngine,
    petiole: RulesEngine,
}

impl LabEngine {
    pub fn new() -> Self {
        Self::with_tables(EngineTables::default())
    }

    pub fn with_tables(tables: EngineTables) -> Self {
        Self {
            tables,
            soil: RulesEngine::new(TestType::Soil),
            petiole: RulesEngine::new(TestType::Petiole),
        }
    }

    pub fn tables(&self) -> &EngineTables {
        &self.tables
    }

    pub fn rules(&self, test_type: TestType) -> &RulesEngine {
        match test_type {
            TestType::Soil => &self.soil,
            TestType::Petiole => &self.petiole,
        }
    }

    /// Validate, evaluate and sort. An out-of-range value anywhere replaces the
    /// whole output with a single data-quality recommendation. The output is
    /// never empty: a record with nothing to assess gets an informational finding.
    pub fn generate_recommendations(
        &self,
        test_type: TestType,
        parameters: &ParameterMap,
    ) -> Vec<Recommendation> {
        let offending = self.tables.validation.validate(test_type, parameters);
        if !offending.is_empty() {
            tracing::debug!(
                "Validation failed for {} test: {}",
                test_type,
                offending.join(", ")
            );
            return vec![data_quality_recommendation(&offending)];
        }

        let recommendations = self
            .rules(test_type)
            .evaluate(parameters, &self.tables.remedies);
        if recommendations.is_empty() {
            tracing::debug!("Nothing to assess in {} test", test_type);
            return vec![no_findings_recommendation(test_type)];
        }
        sort_by_priority(recommendations)
    }

    pub fn generate_soil_test_recommendations(&self, parameters: &ParameterMap) -> Vec<Recommendation> {
        self.generate_recommendations(TestType::Soil, parameters)
    }

    pub fn generate_petiole_test_recommendations(
        &self,
        parameters: &ParameterMap,
    ) -> Vec<Recommendation> {
        self.generate_recommendations(TestType::Petiole, parameters)
    }

    pub fn generate_fertilizer_plan(
        &self,
        record: &TestRecord,
        recommendations: &[Recommendation],
        start: NaiveDate,
    ) -> Vec<FertilizerPlanItem> {
        build_plan(
            record,
            recommendations,
            start,
            &self.tables.remedies,
            &self.tables.plan,
        )
    }

    pub fn check_test_reminders(
        &self,
        soil_age_days: Option<i64>,
        petiole_age_days: Option<i64>,
    ) -> TestReminders {
        reminders::check_test_reminders(soil_age_days, petiole_age_days, &self.tables.reminders)
    }

    /// Full pipeline for one record: recommendations, then the plan derived from them.
    pub fn analyze(&self, record: &TestRecord, start: NaiveDate) -> Analysis {
        let recommendations = self.generate_recommendations(record.test_type, &record.parameters);
        let plan = self.generate_fertilizer_plan(record, &recommendations, start);
        Analysis {
            recommendations,
            plan,
        }
    }
}

impl Default for LabEngine {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_ENGINE: OnceLock<LabEngine> = OnceLock::new();

fn default_engine() -> &'static LabEngine {
    DEFAULT_ENGINE.get_or_init(LabEngine::new)
}

pub fn generate_soil_test_recommendations(parameters: &ParameterMap) -> Vec<Recommendation> {
    default_engine().generate_soil_test_recommendations(parameters)
}

pub fn generate_petiole_test_recommendations(parameters: &ParameterMap) -> Vec<Recommendation> {
    default_engine().generate_petiole_test_recommendations(parameters)
}

pub fn generate_fertilizer_plan(
    record: &TestRecord,
    recommendations: &[Recommendation],
    start: NaiveDate,
) -> Vec<FertilizerPlanItem> {
    default_engine().generate_fertilizer_plan(record, recommendations, start)
}

pub fn check_test_reminders(soil_age_days: Option<i64>, petiole_age_days: Option<i64>) -> TestReminders {
    default_engine().check_test_reminders(soil_age_days, petiole_age_days)
}
