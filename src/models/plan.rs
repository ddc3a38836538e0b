use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationMethod {
    Soil,
    Foliar,
    Fertigation,
}

impl ApplicationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationMethod::Soil => "soil",
            ApplicationMethod::Foliar => "foliar",
            ApplicationMethod::Fertigation => "fertigation",
        }
    }
}

impl std::fmt::Display for ApplicationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies one entry of the shared remedy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemedyKey {
    // Soil corrections
    LimeHeavy,
    LimeLight,
    GypsumReclamation,
    ElementalSulfur,
    GypsumSalinity,
    FarmyardManure,
    UreaSevere,
    Urea,
    GypsumPhosphorus,
    DapSevere,
    Dap,
    MopSevere,
    Mop,
    GypsumCalcium,
    MagnesiumSulphate,
    BentoniteSulphur,
    ZincSulphate,
    FerrousSulphate,
    ManganeseSulphate,
    Borax,
    GypsumSodic,
    // Soil maintenance
    MaintenanceNpk,
    MaintenancePotassiumNitrate,
    // Petiole corrections
    UreaFertigationSevere,
    UreaFertigation,
    MapFertigation,
    SopFertigation,
    SopFoliar,
    CalciumNitrateFoliar,
    MagnesiumSulphateFoliar,
    ZincSulphateFoliar,
    ChelatedIronFoliar,
    ManganeseSulphateFoliar,
    BoricAcidFoliar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanApplication {
    pub product: String,
    pub dosage: String,
    pub method: ApplicationMethod,
    pub purpose: String,
    /// Parameter of the recommendation that triggered this application.
    pub parameter: String,
}

/// One time-phase of a fertilizer plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerPlanItem {
    pub month: String,
    pub date: NaiveDate,
    pub growth_stage: String,
    pub applications: Vec<PlanApplication>,
    pub notes: String,
}

impl FertilizerPlanItem {
    pub fn new(date: NaiveDate, growth_stage: impl Into<String>) -> Self {
        Self {
            month: date.format("%B %Y").to_string(),
            date,
            growth_stage: growth_stage.into(),
            applications: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_application(mut self, application: PlanApplication) -> Self {
        self.applications.push(application);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_item_month_label() {
        let item = FertilizerPlanItem::new(
            NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
            "Bud Break / Shoot Growth",
        );
        assert_eq!(item.month, "October 2025");
        assert!(item.applications.is_empty());
    }

    #[test]
    fn method_serializes_lowercase() {
        let json = serde_json::to_string(&ApplicationMethod::Fertigation).unwrap();
        assert_eq!(json, "\"fertigation\"");
    }
}
