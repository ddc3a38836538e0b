//! Fertilizer plan generation.
//!
//! Urgent action findings become one immediate plan item. A pH correction adds
//! a verification soil test; a soil test with nitrogen in its optimal band adds
//! a maintenance fertigation phase. Recommendations produced by the rule sets
//! carry structured remedies; those supplied from elsewhere are matched by
//! product keywords in their technical text.

use chrono::{Datelike, Months, NaiveDate};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::logic::dosage::{DosageEntry, DosageTable};
use crate::logic::normalize::normalize;
use crate::logic::rules::soil::{NITROGEN_OPTIMAL, PH_OPTIMAL, PH_PHOSPHORUS_LOCKUP};
use crate::models::{
    ApplicationMethod, FertilizerPlanItem, Parameter, PlanApplication, Priority, Recommendation,
    RemedyKey, TestRecord, TestType,
};

pub const SOIL_IMMEDIATE_STAGE: &str = "Pre-season / Bud Break";
pub const PETIOLE_IMMEDIATE_STAGE: &str = "Immediate Corrective Action";

const DOSAGE_PATTERN: &str =
    r"(?i)(\d+(?:\.\d+)?)(?:\s*-\s*(\d+(?:\.\d+)?))?\s*(tons/acre|kg/acre|g/L)";

static DOSAGE_RE: OnceLock<Option<Regex>> = OnceLock::new();

/// Grapevine phenology for an October fruit-pruning cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthStage {
    BudBreak,
    Flowering,
    BerryDevelopment,
    Ripening,
    PostHarvestRest,
    FoundationGrowth,
}

impl GrowthStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::BudBreak => "Bud Break / Shoot Growth",
            GrowthStage::Flowering => "Flowering / Fruit Set",
            GrowthStage::BerryDevelopment => "Berry Development",
            GrowthStage::Ripening => "Ripening / Harvest",
            GrowthStage::PostHarvestRest => "Post-harvest Rest",
            GrowthStage::FoundationGrowth => "Foundation Pruning / Cane Development",
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        match date.month() {
            10 | 11 => GrowthStage::BudBreak,
            12 => GrowthStage::Flowering,
            1 | 2 => GrowthStage::BerryDevelopment,
            3 | 4 => GrowthStage::Ripening,
            5 => GrowthStage::PostHarvestRest,
            _ => GrowthStage::FoundationGrowth,
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSettings {
    pub verification_offset_months: u32,
    pub maintenance_offset_months: u32,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            verification_offset_months: 2,
            maintenance_offset_months: 3,
        }
    }
}

/// Build the time-phased plan for a test record from its sorted recommendations.
///
/// Returns an empty plan when no critical/high action finding yields an application.
pub fn build_plan(
    record: &TestRecord,
    recommendations: &[Recommendation],
    start: NaiveDate,
    remedies: &DosageTable,
    settings: &PlanSettings,
) -> Vec<FertilizerPlanItem> {
    let urgent: Vec<&Recommendation> = recommendations
        .iter()
        .filter(|r| r.is_urgent_action() && !r.is_data_quality())
        .collect();

    let applications: Vec<PlanApplication> = urgent
        .iter()
        .flat_map(|rec| applications_for(rec, record, remedies))
        .collect();

    if applications.is_empty() {
        tracing::debug!(
            "No qualifying action recommendations for {} test on {}; plan is empty",
            record.test_type,
            record.farm_id
        );
        return Vec::new();
    }

    let stage = match record.test_type {
        TestType::Soil => SOIL_IMMEDIATE_STAGE,
        TestType::Petiole => PETIOLE_IMMEDIATE_STAGE,
    };

    let ph_corrected = applications
        .iter()
        .any(|a| normalize(&a.parameter) == Some(Parameter::Ph));

    let mut immediate = FertilizerPlanItem::new(start, stage).with_notes(format!(
        "Corrective applications for {} finding(s) from the {} test of {}.",
        urgent.len(),
        record.test_type,
        record.date
    ));
    immediate.applications = applications;
    let mut plan = vec![immediate];

    if ph_corrected {
        let date = add_months(start, settings.verification_offset_months);
        plan.push(
            FertilizerPlanItem::new(date, GrowthStage::for_date(date).as_str())
                .with_application(PlanApplication {
                    product: "Follow-up Soil Test".to_string(),
                    dosage: "1 composite sample per block".to_string(),
                    method: ApplicationMethod::Soil,
                    purpose: "verify pH correction".to_string(),
                    parameter: Parameter::Ph.label().to_string(),
                })
                .with_notes("Re-test soil pH to confirm the amendment has reacted."),
        );
    }

    let nitrogen_optimal = record.test_type == TestType::Soil
        && record
            .parameters
            .get(Parameter::Nitrogen)
            .is_some_and(|n| NITROGEN_OPTIMAL.contains(&n));
    if nitrogen_optimal {
        let date = add_months(start, settings.maintenance_offset_months);
        let mut maintenance = FertilizerPlanItem::new(date, GrowthStage::for_date(date).as_str())
            .with_notes("Nitrogen is in its optimal band; hold it there with weekly fertigation.");
        maintenance.applications = remedies
            .maintenance(TestType::Soil)
            .map(|e| e.to_application(Parameter::Nitrogen.label()))
            .collect();
        if !maintenance.applications.is_empty() {
            plan.push(maintenance);
        }
    }

    plan.sort_by_key(|item| item.date);
    tracing::debug!(
        "Built {} plan item(s) for {} test on {}",
        plan.len(),
        record.test_type,
        record.farm_id
    );
    plan
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Applications for one urgent recommendation, in the order its remedies appear.
fn applications_for(
    rec: &Recommendation,
    record: &TestRecord,
    remedies: &DosageTable,
) -> Vec<PlanApplication> {
    if !rec.remedies.is_empty() {
        return rec
            .remedies
            .iter()
            .filter_map(|key| remedies.get(*key))
            .map(|entry| entry.to_application(&rec.parameter))
            .collect();
    }

    let Some(parameter) = normalize(&rec.parameter) else {
        tracing::debug!("No remedies known for parameter '{}'", rec.parameter);
        return Vec::new();
    };

    let selected = match_remedies(rec, record, parameter, remedies);
    let dosages = extract_dosages(&rec.technical);

    selected
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let dosage = if dosages.len() == selected.len() {
                dosages[i].clone()
            } else {
                entry.dosage.clone()
            };
            entry.to_application_with_dosage(&rec.parameter, dosage)
        })
        .collect()
}

/// Pick table entries for a recommendation without structured remedies.
///
/// Entries whose product is mentioned in the text win, ordered by mention.
/// Among entries sharing a product, an explicitly mentioned foliar/fertigation
/// method beats a matching priority. With no mention at all, a single default
/// remedy is chosen by `default_remedies`.
fn match_remedies<'t>(
    rec: &Recommendation,
    record: &TestRecord,
    parameter: Parameter,
    remedies: &'t DosageTable,
) -> Vec<&'t DosageEntry> {
    let text = rec.technical.to_lowercase();
    let preference = |entry: &DosageEntry| -> u8 {
        let method_named =
            entry.method != ApplicationMethod::Soil && text.contains(entry.method.as_str());
        u8::from(method_named) * 2 + u8::from(entry.priority == rec.priority)
    };

    let candidates: Vec<&DosageEntry> = remedies.candidates(record.test_type, parameter).collect();
    let mut mentioned: Vec<(usize, &DosageEntry)> = Vec::new();

    for &entry in &candidates {
        let Some(position) = entry.mentioned_in(&text) else {
            continue;
        };
        match mentioned.iter_mut().find(|(_, e)| e.product == entry.product) {
            Some(slot) => {
                if preference(entry) > preference(slot.1) {
                    *slot = (position, entry);
                }
            }
            None => mentioned.push((position, entry)),
        }
    }

    if mentioned.is_empty() {
        return default_remedies(rec, record, parameter, &candidates, remedies);
    }

    mentioned.sort_by_key(|(position, _)| *position);
    mentioned.into_iter().map(|(_, e)| e).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhShift {
    Raise,
    Lower,
}

/// Direction of a pH correction: from the text first, then from the record.
fn ph_shift(rec: &Recommendation, record: &TestRecord) -> Option<PhShift> {
    let text = rec.technical.to_lowercase();
    match (text.contains("acid"), text.contains("alkalin")) {
        (true, false) => return Some(PhShift::Raise),
        (false, true) => return Some(PhShift::Lower),
        _ => {}
    }

    let ph = record.parameters.get(Parameter::Ph)?;
    if ph < *PH_OPTIMAL.start() {
        Some(PhShift::Raise)
    } else if ph > *PH_OPTIMAL.end() {
        Some(PhShift::Lower)
    } else {
        None
    }
}

/// One remedy for a finding whose text names no product. Low soil phosphorus
/// on alkaline soil is the exception: gypsum goes ahead of DAP.
fn default_remedies<'t>(
    rec: &Recommendation,
    record: &TestRecord,
    parameter: Parameter,
    candidates: &[&'t DosageEntry],
    remedies: &'t DosageTable,
) -> Vec<&'t DosageEntry> {
    let severe = rec.priority == Priority::Critical;

    let keys = match (record.test_type, parameter) {
        (TestType::Soil, Parameter::Ph) => match ph_shift(rec, record) {
            Some(PhShift::Raise) if severe => vec![RemedyKey::LimeHeavy],
            Some(PhShift::Raise) => vec![RemedyKey::LimeLight],
            Some(PhShift::Lower) if severe => vec![RemedyKey::GypsumReclamation],
            Some(PhShift::Lower) => vec![RemedyKey::ElementalSulfur],
            None => {
                tracing::debug!("Cannot tell which way to correct pH; no application planned");
                Vec::new()
            }
        },
        (TestType::Soil, Parameter::Phosphorus) => {
            let dap = if severe { RemedyKey::DapSevere } else { RemedyKey::Dap };
            let alkaline = record
                .parameters
                .get(Parameter::Ph)
                .is_some_and(|ph| ph > PH_PHOSPHORUS_LOCKUP);
            if alkaline {
                vec![RemedyKey::GypsumPhosphorus, dap]
            } else {
                vec![dap]
            }
        }
        _ => {
            return candidates
                .iter()
                .find(|e| e.priority == rec.priority)
                .or(candidates.first())
                .copied()
                .into_iter()
                .collect();
        }
    };

    keys.into_iter().filter_map(|key| remedies.get(key)).collect()
}

/// Dosage strings ("25-30 kg/acre", "2 g/L") in order of appearance.
pub fn extract_dosages(text: &str) -> Vec<String> {
    let Some(re) = DOSAGE_RE.get_or_init(|| Regex::new(DOSAGE_PATTERN).ok()) else {
        return Vec::new();
    };

    re.captures_iter(text)
        .map(|cap| {
            let unit = &cap[3];
            match cap.get(2) {
                Some(high) => format!("{}-{} {}", &cap[1], high.as_str(), unit),
                None => format!("{} {}", &cap[1], unit),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::RulesEngine;
    use crate::logic::priority::sort_by_priority;
    use crate::models::{ParameterMap, Priority, RecommendationKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(test_type: TestType, pairs: &[(Parameter, f64)]) -> TestRecord {
        TestRecord::new(
            test_type,
            "block-3",
            date(2025, 9, 1),
            ParameterMap::try_from(pairs).unwrap(),
        )
    }

    fn plan_for(test_type: TestType, pairs: &[(Parameter, f64)]) -> Vec<FertilizerPlanItem> {
        let record = record(test_type, pairs);
        let table = DosageTable::default();
        let recs = sort_by_priority(RulesEngine::new(test_type).evaluate(&record.parameters, &table));
        build_plan(&record, &recs, date(2025, 10, 1), &table, &PlanSettings::default())
    }

    #[test]
    fn external_urea_recommendation_builds_single_application() {
        let recs = vec![Recommendation::new(
            Priority::High,
            RecommendationKind::Action,
            "Nitrogen",
            "Nitrogen is low. Broadcast urea at 25-30 kg/acre before irrigation.",
            "Add nitrogen",
        )];
        let record = record(TestType::Soil, &[(Parameter::Nitrogen, 200.0)]);
        let plan = build_plan(
            &record,
            &recs,
            date(2025, 10, 1),
            &DosageTable::default(),
            &PlanSettings::default(),
        );

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].applications.len(), 1);
        let app = &plan[0].applications[0];
        assert_eq!(app.product, "Urea (46-0-0)");
        assert_eq!(app.dosage, "25-30 kg/acre");
        assert_eq!(app.parameter, "Nitrogen");
        assert_eq!(plan[0].growth_stage, SOIL_IMMEDIATE_STAGE);
    }

    #[test]
    fn text_dosage_overrides_table_when_counts_match() {
        let recs = vec![Recommendation::new(
            Priority::High,
            RecommendationKind::Action,
            "Potassium",
            "Apply MOP at 35 - 45 kg/acre.",
            "Add potash",
        )];
        let record = record(TestType::Soil, &[]);
        let plan = build_plan(
            &record,
            &recs,
            date(2025, 10, 1),
            &DosageTable::default(),
            &PlanSettings::default(),
        );
        assert_eq!(plan[0].applications[0].dosage, "35-45 kg/acre");
        assert_eq!(plan[0].applications[0].product, "MOP (0-0-60)");
    }

    #[test]
    fn missing_dosage_falls_back_to_table() {
        let recs = vec![Recommendation::new(
            Priority::Critical,
            RecommendationKind::Action,
            "pH",
            "Soil is very acidic; lime is required.",
            "Add lime",
        )];
        let record = record(TestType::Soil, &[]);
        let plan = build_plan(
            &record,
            &recs,
            date(2025, 10, 1),
            &DosageTable::default(),
            &PlanSettings::default(),
        );
        assert_eq!(plan[0].applications[0].dosage, "2-3 tons/acre");
    }

    #[test]
    fn foliar_mention_selects_foliar_entry() {
        let recs = vec![Recommendation::new(
            Priority::Critical,
            RecommendationKind::Action,
            "Potassium",
            "Spray sulphate of potash as a foliar feed.",
            "Spray potash",
        )];
        let record = record(TestType::Petiole, &[]);
        let plan = build_plan(
            &record,
            &recs,
            date(2025, 10, 1),
            &DosageTable::default(),
            &PlanSettings::default(),
        );
        let app = &plan[0].applications[0];
        assert_eq!(app.method, ApplicationMethod::Foliar);
        assert_eq!(app.dosage, "3-5 g/L");
        assert_eq!(plan[0].growth_stage, PETIOLE_IMMEDIATE_STAGE);
    }

    #[test]
    fn unknown_parameter_yields_no_application() {
        let recs = vec![Recommendation::new(
            Priority::High,
            RecommendationKind::Action,
            "Irrigation Water",
            "Apply urea at 25-30 kg/acre.",
            "s",
        )];
        let record = record(TestType::Soil, &[]);
        let plan = build_plan(
            &record,
            &recs,
            date(2025, 10, 1),
            &DosageTable::default(),
            &PlanSettings::default(),
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn alkaline_low_phosphorus_plans_gypsum_then_dap() {
        let plan = plan_for(
            TestType::Soil,
            &[(Parameter::Phosphorus, 15.0), (Parameter::Ph, 8.2)],
        );
        let products: Vec<&str> = plan[0]
            .applications
            .iter()
            .filter(|a| a.parameter == "Phosphorus")
            .map(|a| a.product.as_str())
            .collect();
        assert_eq!(products, vec!["Gypsum (CaSO4.2H2O)", "DAP (18-46-0)"]);

        let plain = plan_for(TestType::Soil, &[(Parameter::Phosphorus, 15.0)]);
        let products: Vec<&str> = plain[0]
            .applications
            .iter()
            .map(|a| a.product.as_str())
            .collect();
        assert_eq!(products, vec!["DAP (18-46-0)"]);
    }

    #[test]
    fn ph_correction_adds_verification_two_months_later() {
        let plan = plan_for(TestType::Soil, &[(Parameter::Ph, 5.0)]);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].date, date(2025, 10, 1));
        assert_eq!(plan[1].date, date(2025, 12, 1));
        assert_eq!(plan[1].applications.len(), 1);
        assert_eq!(plan[1].applications[0].purpose, "verify pH correction");
        assert_eq!(plan[1].applications[0].method, ApplicationMethod::Soil);
        assert_eq!(plan[1].growth_stage, GrowthStage::Flowering.as_str());
    }

    #[test]
    fn optimal_nitrogen_adds_maintenance_after_corrections() {
        let plan = plan_for(
            TestType::Soil,
            &[
                (Parameter::Ph, 5.0),
                (Parameter::Nitrogen, 400.0),
                (Parameter::Zinc, 0.3),
            ],
        );
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[2].date, date(2026, 1, 1));
        assert_eq!(plan[2].growth_stage, GrowthStage::BerryDevelopment.as_str());
        assert!(plan[2]
            .applications
            .iter()
            .all(|a| a.method == ApplicationMethod::Fertigation));
        assert!(plan.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn optimal_nitrogen_alone_does_not_fabricate_a_plan() {
        let plan = plan_for(TestType::Soil, &[(Parameter::Nitrogen, 400.0), (Parameter::Ph, 7.0)]);
        assert!(plan.is_empty());
    }

    #[test]
    fn petiole_plan_has_no_maintenance_phase() {
        let plan = plan_for(
            TestType::Petiole,
            &[(Parameter::Nitrogen, 1.5), (Parameter::Zinc, 12.0)],
        );
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].applications[0].method, ApplicationMethod::Foliar);
    }

    #[test]
    fn immediate_applications_follow_recommendation_order() {
        let plan = plan_for(
            TestType::Soil,
            &[
                (Parameter::Zinc, 0.3),
                (Parameter::Nitrogen, 100.0),
                (Parameter::Potassium, 120.0),
            ],
        );
        let params: Vec<&str> = plan[0]
            .applications
            .iter()
            .map(|a| a.parameter.as_str())
            .collect();
        assert_eq!(params, vec!["Nitrogen", "Potassium", "Zinc"]);
    }

    #[test]
    fn watch_and_moderate_findings_are_not_planned() {
        let plan = plan_for(TestType::Soil, &[(Parameter::Ec, 3.0), (Parameter::Zinc, 0.9)]);
        assert!(plan.is_empty());
    }

    fn external_plan(
        priority: Priority,
        parameter: &str,
        technical: &str,
        pairs: &[(Parameter, f64)],
    ) -> Vec<PlanApplication> {
        let recs = vec![Recommendation::new(
            priority,
            RecommendationKind::Action,
            parameter,
            technical,
            "s",
        )];
        let record = record(TestType::Soil, pairs);
        build_plan(
            &record,
            &recs,
            date(2025, 10, 1),
            &DosageTable::default(),
            &PlanSettings::default(),
        )
        .into_iter()
        .next()
        .map(|item| item.applications)
        .unwrap_or_default()
    }

    #[test]
    fn unnamed_product_for_acidic_ph_plans_lime_only() {
        let apps = external_plan(
            Priority::High,
            "pH",
            "Soil pH 5.7 is acidic. Correct before pruning.",
            &[],
        );
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].product, "Agricultural Lime (CaCO3)");
        assert_eq!(apps[0].dosage, "1-2 tons/acre");
    }

    #[test]
    fn unnamed_product_for_alkaline_ph_plans_gypsum_only() {
        let apps = external_plan(
            Priority::Critical,
            "pH",
            "Soil pH 8.9 is strongly alkaline.",
            &[],
        );
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].product, "Gypsum (CaSO4.2H2O)");
        assert_eq!(apps[0].dosage, "2-3 tons/acre");
        assert_eq!(apps[0].purpose, "reclaim alkaline soil");
    }

    #[test]
    fn ph_direction_falls_back_to_record_value() {
        let apps = external_plan(
            Priority::Critical,
            "pH",
            "pH needs urgent correction.",
            &[(Parameter::Ph, 5.2)],
        );
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].product, "Agricultural Lime (CaCO3)");
        assert_eq!(apps[0].dosage, "2-3 tons/acre");

        let apps = external_plan(
            Priority::High,
            "pH",
            "pH needs urgent correction.",
            &[(Parameter::Ph, 8.3)],
        );
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].product, "Elemental Sulfur (90% S)");

        assert!(external_plan(Priority::High, "pH", "pH needs urgent correction.", &[]).is_empty());
    }

    #[test]
    fn unnamed_phosphorus_product_adds_gypsum_only_on_alkaline_soil() {
        let apps = external_plan(Priority::High, "Phosphorus", "Phosphorus is deficient.", &[]);
        let products: Vec<&str> = apps.iter().map(|a| a.product.as_str()).collect();
        assert_eq!(products, vec!["DAP (18-46-0)"]);
        assert_eq!(apps[0].dosage, "50-75 kg/acre");

        let apps = external_plan(
            Priority::High,
            "Phosphorus",
            "Phosphorus is deficient.",
            &[(Parameter::Ph, 8.3)],
        );
        let products: Vec<&str> = apps.iter().map(|a| a.product.as_str()).collect();
        assert_eq!(products, vec!["Gypsum (CaSO4.2H2O)", "DAP (18-46-0)"]);
    }

    #[test]
    fn unnamed_product_picks_one_entry_at_matching_priority() {
        let apps = external_plan(Priority::Critical, "Nitrogen", "Nitrogen is very low.", &[]);
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].dosage, "40-50 kg/acre");

        let apps = external_plan(Priority::Critical, "Zinc", "Zinc is very low.", &[]);
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].product, "Zinc Sulphate (ZnSO4)");
    }

    #[test]
    fn unplanned_ph_finding_adds_no_verification_test() {
        let table = DosageTable::new(DosageTable::default().get(RemedyKey::Urea).cloned());
        let record = record(
            TestType::Soil,
            &[(Parameter::Ph, 5.0), (Parameter::Nitrogen, 200.0)],
        );
        let recs = sort_by_priority(
            RulesEngine::new(TestType::Soil).evaluate(&record.parameters, &table),
        );
        let plan = build_plan(&record, &recs, date(2025, 10, 1), &table, &PlanSettings::default());

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].applications.len(), 1);
        assert_eq!(plan[0].applications[0].parameter, "Nitrogen");
    }

    #[test]
    fn extract_dosages_in_order() {
        assert_eq!(
            extract_dosages("Apply gypsum at 200-250 kg/acre, then DAP (18-46-0) at 50-75 kg/acre"),
            vec!["200-250 kg/acre", "50-75 kg/acre"]
        );
        assert_eq!(extract_dosages("Spray 2 g/L twice"), vec!["2 g/L"]);
        assert!(extract_dosages("Available nitrogen 120 kg/ha").is_empty());
    }

    #[test]
    fn growth_stage_calendar() {
        assert_eq!(GrowthStage::for_date(date(2025, 10, 15)), GrowthStage::BudBreak);
        assert_eq!(GrowthStage::for_date(date(2025, 12, 1)), GrowthStage::Flowering);
        assert_eq!(GrowthStage::for_date(date(2026, 2, 1)), GrowthStage::BerryDevelopment);
        assert_eq!(GrowthStage::for_date(date(2026, 4, 1)), GrowthStage::Ripening);
        assert_eq!(GrowthStage::for_date(date(2026, 5, 1)), GrowthStage::PostHarvestRest);
        assert_eq!(GrowthStage::for_date(date(2026, 7, 1)), GrowthStage::FoundationGrowth);
    }
}
