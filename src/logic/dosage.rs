//! Shared remedy table.
//!
//! Rule sets render their technical prose from these entries and the plan
//! generator builds applications from the same entries, so product names and
//! dosages cannot drift apart between the two layers.

use crate::models::{ApplicationMethod, Parameter, PlanApplication, Priority, RemedyKey, TestType};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct DosageEntry {
    pub key: RemedyKey,
    pub test_type: TestType,
    pub parameter: Parameter,
    /// Severity of the finding this remedy answers; `Optimal` marks maintenance entries.
    pub priority: Priority,
    pub product: String,
    pub dosage: String,
    pub method: ApplicationMethod,
    pub purpose: String,
    /// Lower-case words that identify this product in free text.
    pub keywords: Vec<String>,
}

impl DosageEntry {
    /// "Product at dosage", as embedded in technical recommendation text.
    pub fn instruction(&self) -> String {
        format!("{} at {}", self.product, self.dosage)
    }

    pub fn mentioned_in(&self, text_lower: &str) -> Option<usize> {
        self.keywords
            .iter()
            .filter_map(|k| text_lower.find(k.as_str()))
            .min()
    }

    pub fn to_application(&self, parameter: &str) -> PlanApplication {
        self.to_application_with_dosage(parameter, self.dosage.clone())
    }

    pub fn to_application_with_dosage(&self, parameter: &str, dosage: String) -> PlanApplication {
        PlanApplication {
            product: self.product.clone(),
            dosage,
            method: self.method,
            purpose: self.purpose.clone(),
            parameter: parameter.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DosageTable {
    entries: BTreeMap<RemedyKey, DosageEntry>,
}

impl DosageTable {
    pub fn new(entries: impl IntoIterator<Item = DosageEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.key, e)).collect(),
        }
    }

    /// Look up an entry. The built-in table covers every key; a substitute table
    /// that leaves one out yields `None`.
    pub fn get(&self, key: RemedyKey) -> Option<&DosageEntry> {
        self.entries.get(&key)
    }

    /// Remedies a rule set can emit for this parameter, in table order.
    pub fn candidates(
        &self,
        test_type: TestType,
        parameter: Parameter,
    ) -> impl Iterator<Item = &DosageEntry> + '_ {
        self.entries
            .values()
            .filter(move |e| e.test_type == test_type && e.parameter == parameter)
            .filter(|e| e.priority != Priority::Optimal)
    }

    pub fn maintenance(&self, test_type: TestType) -> impl Iterator<Item = &DosageEntry> + '_ {
        self.entries
            .values()
            .filter(move |e| e.test_type == test_type && e.priority == Priority::Optimal)
    }

    pub fn with_entry(mut self, entry: DosageEntry) -> Self {
        self.entries.insert(entry.key, entry);
        self
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    key: RemedyKey,
    test_type: TestType,
    parameter: Parameter,
    priority: Priority,
    product: &str,
    dosage: &str,
    method: ApplicationMethod,
    purpose: &str,
    keywords: &[&str],
) -> DosageEntry {
    DosageEntry {
        key,
        test_type,
        parameter,
        priority,
        product: product.to_string(),
        dosage: dosage.to_string(),
        method,
        purpose: purpose.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

impl Default for DosageTable {
    fn default() -> Self {
        use ApplicationMethod::{Fertigation, Foliar, Soil};
        use Parameter as P;
        use Priority::{Critical, High, Optimal};
        use RemedyKey as R;
        use TestType::{Petiole, Soil as SoilTest};

        Self::new([
            // Soil corrections
            entry(R::LimeHeavy, SoilTest, P::Ph, Critical, "Agricultural Lime (CaCO3)",
                "2-3 tons/acre", Soil, "raise soil pH", &["lime"]),
            entry(R::LimeLight, SoilTest, P::Ph, High, "Agricultural Lime (CaCO3)",
                "1-2 tons/acre", Soil, "raise soil pH", &["lime"]),
            entry(R::GypsumReclamation, SoilTest, P::Ph, Critical, "Gypsum (CaSO4.2H2O)",
                "2-3 tons/acre", Soil, "reclaim alkaline soil", &["gypsum"]),
            entry(R::ElementalSulfur, SoilTest, P::Ph, High, "Elemental Sulfur (90% S)",
                "100-200 kg/acre", Soil, "lower soil pH", &["sulfur", "sulphur"]),
            entry(R::GypsumSalinity, SoilTest, P::Ec, Critical, "Gypsum (CaSO4.2H2O)",
                "1-2 tons/acre", Soil, "displace salts before leaching", &["gypsum"]),
            entry(R::FarmyardManure, SoilTest, P::OrganicCarbon, High,
                "Well-rotted Farmyard Manure", "8-10 tons/acre", Soil,
                "build soil organic carbon", &["manure", "fym"]),
            entry(R::UreaSevere, SoilTest, P::Nitrogen, Critical, "Urea (46-0-0)",
                "40-50 kg/acre", Soil, "correct nitrogen deficiency", &["urea"]),
            entry(R::Urea, SoilTest, P::Nitrogen, High, "Urea (46-0-0)",
                "25-30 kg/acre", Soil, "correct nitrogen deficiency", &["urea"]),
            entry(R::GypsumPhosphorus, SoilTest, P::Phosphorus, High, "Gypsum (CaSO4.2H2O)",
                "200-250 kg/acre", Soil, "improve phosphorus availability in alkaline soil",
                &["gypsum"]),
            entry(R::DapSevere, SoilTest, P::Phosphorus, Critical, "DAP (18-46-0)",
                "75-100 kg/acre", Soil, "correct phosphorus deficiency", &["dap"]),
            entry(R::Dap, SoilTest, P::Phosphorus, High, "DAP (18-46-0)",
                "50-75 kg/acre", Soil, "correct phosphorus deficiency", &["dap"]),
            entry(R::MopSevere, SoilTest, P::Potassium, Critical, "MOP (0-0-60)",
                "60-80 kg/acre", Soil, "correct potassium deficiency", &["mop", "muriate"]),
            entry(R::Mop, SoilTest, P::Potassium, High, "MOP (0-0-60)",
                "40-50 kg/acre", Soil, "correct potassium deficiency", &["mop", "muriate"]),
            entry(R::GypsumCalcium, SoilTest, P::Calcium, High, "Gypsum (CaSO4.2H2O)",
                "200-300 kg/acre", Soil, "correct calcium deficiency", &["gypsum"]),
            entry(R::MagnesiumSulphate, SoilTest, P::Magnesium, High,
                "Magnesium Sulphate (MgSO4)", "20-25 kg/acre", Soil,
                "correct magnesium deficiency", &["magnesium sulphate", "mgso4"]),
            entry(R::BentoniteSulphur, SoilTest, P::Sulfur, High, "Bentonite Sulphur (90% S)",
                "10-15 kg/acre", Soil, "correct sulfur deficiency", &["bentonite", "sulphur"]),
            entry(R::ZincSulphate, SoilTest, P::Zinc, High, "Zinc Sulphate (ZnSO4)",
                "8-10 kg/acre", Soil, "correct zinc deficiency", &["zinc sulphate", "znso4"]),
            entry(R::FerrousSulphate, SoilTest, P::Iron, High, "Ferrous Sulphate (FeSO4)",
                "10-15 kg/acre", Soil, "correct iron deficiency", &["ferrous", "feso4"]),
            entry(R::ManganeseSulphate, SoilTest, P::Manganese, High,
                "Manganese Sulphate (MnSO4)", "5-8 kg/acre", Soil,
                "correct manganese deficiency", &["manganese sulphate", "mnso4"]),
            entry(R::Borax, SoilTest, P::Boron, High, "Borax (10.5% B)", "2-4 kg/acre", Soil,
                "correct boron deficiency", &["borax"]),
            entry(R::GypsumSodic, SoilTest, P::Sodium, High, "Gypsum (CaSO4.2H2O)",
                "1-2 tons/acre", Soil, "displace exchangeable sodium", &["gypsum"]),
            // Soil maintenance
            entry(R::MaintenanceNpk, SoilTest, P::Nitrogen, Optimal, "NPK 19-19-19",
                "3-4 kg/acre per week", Fertigation, "maintain balanced nutrition",
                &["19-19-19"]),
            entry(R::MaintenancePotassiumNitrate, SoilTest, P::Nitrogen, Optimal,
                "Potassium Nitrate (13-0-45)", "2-3 kg/acre per week", Fertigation,
                "support berry development", &["potassium nitrate", "13-0-45"]),
            // Petiole corrections
            entry(R::UreaFertigationSevere, Petiole, P::Nitrogen, Critical, "Urea (46-0-0)",
                "15-20 kg/acre", Fertigation, "correct in-season nitrogen deficiency",
                &["urea"]),
            entry(R::UreaFertigation, Petiole, P::Nitrogen, High, "Urea (46-0-0)",
                "8-10 kg/acre", Fertigation, "correct in-season nitrogen deficiency",
                &["urea"]),
            entry(R::MapFertigation, Petiole, P::Phosphorus, High,
                "Mono Ammonium Phosphate (12-61-0)", "5-7 kg/acre", Fertigation,
                "correct in-season phosphorus deficiency",
                &["mono ammonium phosphate", "12-61-0", "map"]),
            entry(R::SopFertigation, Petiole, P::Potassium, Critical,
                "Sulphate of Potash (0-0-50)", "15-20 kg/acre", Fertigation,
                "correct in-season potassium deficiency", &["sulphate of potash", "sop"]),
            entry(R::SopFoliar, Petiole, P::Potassium, High, "Sulphate of Potash (0-0-50)",
                "3-5 g/L", Foliar, "correct in-season potassium deficiency",
                &["sulphate of potash", "sop"]),
            entry(R::CalciumNitrateFoliar, Petiole, P::Calcium, High, "Calcium Nitrate",
                "2-3 g/L", Foliar, "correct calcium deficiency", &["calcium nitrate"]),
            entry(R::MagnesiumSulphateFoliar, Petiole, P::Magnesium, High,
                "Magnesium Sulphate (MgSO4)", "5-10 g/L", Foliar,
                "correct magnesium deficiency", &["magnesium sulphate", "mgso4"]),
            entry(R::ZincSulphateFoliar, Petiole, P::Zinc, High, "Zinc Sulphate (ZnSO4)",
                "2-3 g/L", Foliar, "correct zinc deficiency", &["zinc sulphate", "znso4"]),
            entry(R::ChelatedIronFoliar, Petiole, P::Iron, High, "Chelated Iron (Fe-EDTA 12%)",
                "1-2 g/L", Foliar, "correct iron chlorosis", &["chelated iron", "fe-edta"]),
            entry(R::ManganeseSulphateFoliar, Petiole, P::Manganese, High,
                "Manganese Sulphate (MnSO4)", "1-2 g/L", Foliar,
                "correct manganese deficiency", &["manganese sulphate", "mnso4"]),
            entry(R::BoricAcidFoliar, Petiole, P::Boron, High, "Boric Acid (17% B)",
                "1-1.5 g/L", Foliar, "correct boron deficiency before flowering",
                &["boric acid", "boron"]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_key() {
        let table = DosageTable::default();
        let keys = [
            RemedyKey::LimeHeavy,
            RemedyKey::LimeLight,
            RemedyKey::GypsumReclamation,
            RemedyKey::ElementalSulfur,
            RemedyKey::GypsumSalinity,
            RemedyKey::FarmyardManure,
            RemedyKey::UreaSevere,
            RemedyKey::Urea,
            RemedyKey::GypsumPhosphorus,
            RemedyKey::DapSevere,
            RemedyKey::Dap,
            RemedyKey::MopSevere,
            RemedyKey::Mop,
            RemedyKey::GypsumCalcium,
            RemedyKey::MagnesiumSulphate,
            RemedyKey::BentoniteSulphur,
            RemedyKey::ZincSulphate,
            RemedyKey::FerrousSulphate,
            RemedyKey::ManganeseSulphate,
            RemedyKey::Borax,
            RemedyKey::GypsumSodic,
            RemedyKey::MaintenanceNpk,
            RemedyKey::MaintenancePotassiumNitrate,
            RemedyKey::UreaFertigationSevere,
            RemedyKey::UreaFertigation,
            RemedyKey::MapFertigation,
            RemedyKey::SopFertigation,
            RemedyKey::SopFoliar,
            RemedyKey::CalciumNitrateFoliar,
            RemedyKey::MagnesiumSulphateFoliar,
            RemedyKey::ZincSulphateFoliar,
            RemedyKey::ChelatedIronFoliar,
            RemedyKey::ManganeseSulphateFoliar,
            RemedyKey::BoricAcidFoliar,
        ];
        for key in keys {
            let entry = table.get(key).expect("missing remedy");
            assert_eq!(entry.key, key);
            assert!(!entry.keywords.is_empty(), "{:?} has no keywords", key);
            let product = entry.product.to_lowercase();
            assert!(
                entry.mentioned_in(&product).is_some(),
                "{:?} keywords do not match its own product name",
                key
            );
        }
    }

    #[test]
    fn candidates_exclude_maintenance() {
        let table = DosageTable::default();
        let keys: Vec<RemedyKey> = table
            .candidates(TestType::Soil, Parameter::Nitrogen)
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec![RemedyKey::UreaSevere, RemedyKey::Urea]);

        let maintenance: Vec<RemedyKey> =
            table.maintenance(TestType::Soil).map(|e| e.key).collect();
        assert_eq!(
            maintenance,
            vec![
                RemedyKey::MaintenanceNpk,
                RemedyKey::MaintenancePotassiumNitrate
            ]
        );
        assert_eq!(table.maintenance(TestType::Petiole).count(), 0);
    }

    #[test]
    fn instruction_embeds_product_and_dosage() {
        let table = DosageTable::default();
        let lime = table.get(RemedyKey::LimeHeavy).unwrap();
        assert_eq!(lime.instruction(), "Agricultural Lime (CaCO3) at 2-3 tons/acre");
    }
}
