//! Soil test rules for grapevine blocks.
//!
//! Each rule is an ordered cascade of mutually exclusive ranges over one
//! parameter. Phosphorus is the only rule that also reads a second parameter:
//! above pH 8.0 phosphate is fixed by calcium, so gypsum is prescribed ahead
//! of DAP. The severity of that finding is the same as for low phosphorus alone.

use super::{action, optimal, savings, watch, Rule, RuleContext, ThresholdRule};
use crate::models::{Parameter, Priority, Recommendation, RemedyKey};
use std::ops::RangeInclusive;

pub const PH_OPTIMAL: RangeInclusive<f64> = 6.5..=7.5;
/// Above this pH, phosphorus recommendations include gypsum.
pub const PH_PHOSPHORUS_LOCKUP: f64 = 8.0;
/// Available nitrogen band (kg/ha) that qualifies a block for maintenance fertigation.
pub const NITROGEN_OPTIMAL: RangeInclusive<f64> = 280.0..=560.0;
pub const PHOSPHORUS_OPTIMAL: RangeInclusive<f64> = 20.0..=50.0;
pub const POTASSIUM_OPTIMAL: RangeInclusive<f64> = 150.0..=300.0;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ThresholdRule::new("soil_ph", Parameter::Ph, ph)),
        Box::new(ThresholdRule::new("soil_ec", Parameter::Ec, ec)),
        Box::new(ThresholdRule::new(
            "soil_organic_carbon",
            Parameter::OrganicCarbon,
            organic_carbon,
        )),
        Box::new(ThresholdRule::new("soil_nitrogen", Parameter::Nitrogen, nitrogen)),
        Box::new(ThresholdRule::new("soil_phosphorus", Parameter::Phosphorus, phosphorus)),
        Box::new(ThresholdRule::new("soil_potassium", Parameter::Potassium, potassium)),
        Box::new(ThresholdRule::new("soil_calcium", Parameter::Calcium, calcium)),
        Box::new(ThresholdRule::new("soil_magnesium", Parameter::Magnesium, magnesium)),
        Box::new(ThresholdRule::new("soil_sulfur", Parameter::Sulfur, sulfur)),
        Box::new(ThresholdRule::new("soil_zinc", Parameter::Zinc, zinc)),
        Box::new(ThresholdRule::new("soil_iron", Parameter::Iron, iron)),
        Box::new(ThresholdRule::new("soil_manganese", Parameter::Manganese, manganese)),
        Box::new(ThresholdRule::new("soil_copper", Parameter::Copper, copper)),
        Box::new(ThresholdRule::new("soil_boron", Parameter::Boron, boron)),
        Box::new(ThresholdRule::new("soil_sodium", Parameter::Sodium, sodium)),
        Box::new(ThresholdRule::new("soil_chloride", Parameter::Chloride, chloride)),
        Box::new(ThresholdRule::new(
            "soil_bicarbonate",
            Parameter::Bicarbonate,
            bicarbonate,
        )),
        Box::new(ThresholdRule::new("soil_carbonate", Parameter::Carbonate, carbonate)),
    ]
}

fn ph(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Ph;
    if value < 5.5 {
        action(
            ctx,
            Priority::Critical,
            p,
            &[RemedyKey::LimeHeavy],
            format!(
                "Soil pH {} is strongly acidic (optimal 6.5-7.5). Apply {} incorporated \
                 into the top 15 cm at least 4-6 weeks before pruning. Acidity at this \
                 level locks up phosphorus, calcium and magnesium.",
                value,
                ctx.instruction(RemedyKey::LimeHeavy)
            ),
            "Your soil is far too sour. Spread lime before the next pruning.",
        )
    } else if value < 6.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::LimeLight],
            format!(
                "Soil pH {} is acidic (optimal 6.5-7.5). Apply {} and re-test after \
                 two months.",
                value,
                ctx.instruction(RemedyKey::LimeLight)
            ),
            "Your soil is a little sour. A light dose of lime will help.",
        )
    } else if value > 8.5 {
        action(
            ctx,
            Priority::Critical,
            p,
            &[RemedyKey::GypsumReclamation, RemedyKey::ElementalSulfur],
            format!(
                "Soil pH {} is strongly alkaline (optimal 6.5-7.5), indicating sodic \
                 conditions. Apply {}, followed by {} with heavy irrigation to leach \
                 displaced sodium.",
                value,
                ctx.instruction(RemedyKey::GypsumReclamation),
                ctx.instruction(RemedyKey::ElementalSulfur)
            ),
            "Your soil is far too alkaline. Gypsum and sulfur are needed to bring it back.",
        )
    } else if value > 8.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::ElementalSulfur],
            format!(
                "Soil pH {} is alkaline (optimal 6.5-7.5). Apply {} to acidify the root \
                 zone; iron, zinc and phosphorus availability is reduced at this pH.",
                value,
                ctx.instruction(RemedyKey::ElementalSulfur)
            ),
            "Your soil is alkaline. Sulfur will bring the pH down.",
        )
    } else if PH_OPTIMAL.contains(&value) {
        optimal(
            p,
            format!("Soil pH {} is within the optimal 6.5-7.5 range.", value),
            "Soil pH is just right.",
        )
    } else {
        watch(
            Priority::Low,
            p,
            format!(
                "Soil pH {} is slightly outside the optimal 6.5-7.5 range. No correction \
                 is needed this season; re-check at the next soil test.",
                value
            ),
            "Soil pH is close to ideal. Keep an eye on it.",
        )
    }
}

fn ec(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Ec;
    if value > 4.0 {
        action(
            ctx,
            Priority::Critical,
            p,
            &[RemedyKey::GypsumSalinity],
            format!(
                "EC {} dS/m indicates saline soil (threshold 4.0 dS/m). Apply {} and \
                 leach with two or three heavy irrigations before the next pruning.",
                value,
                ctx.instruction(RemedyKey::GypsumSalinity)
            ),
            "Your soil is too salty. Wash the salt out with heavy watering and gypsum.",
        )
    } else if value > 2.0 {
        watch(
            Priority::High,
            p,
            format!(
                "EC {} dS/m indicates moderate salinity (2.0-4.0 dS/m). Increase the \
                 leaching fraction and prefer sulphate-based potash over MOP.",
                value
            ),
            "Salt is building up. Water more deeply and avoid salty fertilizers.",
        )
    } else if value > 1.0 {
        watch(
            Priority::Low,
            p,
            format!(
                "EC {} dS/m is slightly elevated (optimal below 1.0 dS/m). Monitor \
                 irrigation water quality.",
                value
            ),
            "Salt levels are a little high. Keep watching.",
        )
    } else {
        optimal(
            p,
            format!("EC {} dS/m is within the safe range (below 1.0 dS/m).", value),
            "Salt levels are fine.",
        )
    }
}

fn organic_carbon(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::OrganicCarbon;
    if value < 0.4 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::FarmyardManure],
            format!(
                "Organic carbon {}% is low (optimal above 0.75%). Apply {} during \
                 foundation pruning and maintain a mulch or cover crop.",
                value,
                ctx.instruction(RemedyKey::FarmyardManure)
            ),
            "Your soil needs more organic matter. Add plenty of well-rotted manure.",
        )
    } else if value < 0.75 {
        watch(
            Priority::Moderate,
            p,
            format!(
                "Organic carbon {}% is medium (optimal above 0.75%). Add compost at the \
                 next foundation pruning to build reserves.",
                value
            ),
            "Organic matter is fair. Some compost will help.",
        )
    } else {
        optimal(
            p,
            format!("Organic carbon {}% is adequate.", value),
            "Organic matter is good.",
        )
    }
}

fn nitrogen(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Nitrogen;
    if value < 140.0 {
        action(
            ctx,
            Priority::Critical,
            p,
            &[RemedyKey::UreaSevere],
            format!(
                "Available nitrogen {} kg/ha is very low (optimal 280-560 kg/ha). Apply {} \
                 in three split doses through the growth period.",
                value,
                ctx.instruction(RemedyKey::UreaSevere)
            ),
            "Your vines are badly short of nitrogen. Give urea in several small doses.",
        )
    } else if value < 280.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::Urea],
            format!(
                "Available nitrogen {} kg/ha is low (optimal 280-560 kg/ha). Apply {} in \
                 two split doses.",
                value,
                ctx.instruction(RemedyKey::Urea)
            ),
            "Nitrogen is low. Give some urea.",
        )
    } else if NITROGEN_OPTIMAL.contains(&value) {
        optimal(
            p,
            format!(
                "Available nitrogen {} kg/ha is within the optimal 280-560 kg/ha range. \
                 Continue routine fertigation.",
                value
            ),
            "Nitrogen is at a good level.",
        )
    } else {
        savings(
            p,
            format!(
                "Available nitrogen {} kg/ha is high (above 560 kg/ha). Skip nitrogen \
                 fertilizer this season; excess nitrogen drives vegetative vigour at the \
                 expense of fruitfulness.",
                value
            ),
            "You have plenty of nitrogen. Skip it this season and save money.",
        )
    }
}

fn phosphorus(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Phosphorus;
    let alkaline = ctx
        .parameters
        .get(Parameter::Ph)
        .is_some_and(|ph| ph > PH_PHOSPHORUS_LOCKUP);

    let (priority, dap, severity, simplified) = if value < 10.0 {
        (
            Priority::Critical,
            RemedyKey::DapSevere,
            "very low",
            "Your soil is badly short of phosphorus. Apply DAP now.",
        )
    } else if value < 20.0 {
        (
            Priority::High,
            RemedyKey::Dap,
            "low",
            "Phosphorus is low. Apply DAP.",
        )
    } else if PHOSPHORUS_OPTIMAL.contains(&value) {
        return optimal(
            p,
            format!(
                "Available phosphorus {} ppm is within the optimal 20-50 ppm range.",
                value
            ),
            "Phosphorus is at a good level.",
        );
    } else {
        return savings(
            p,
            format!(
                "Available phosphorus {} ppm is high (above 50 ppm). Skip phosphatic \
                 fertilizer this season.",
                value
            ),
            "You have plenty of phosphorus. Skip it this season and save money.",
        );
    };

    if alkaline {
        action(
            ctx,
            priority,
            p,
            &[RemedyKey::GypsumPhosphorus, dap],
            format!(
                "Available phosphorus {} ppm is {} (optimal 20-50 ppm) and soil pH above \
                 8.0 is fixing phosphate as calcium phosphate. Apply {} first to improve \
                 availability, then {} banded near the root zone.",
                value,
                severity,
                ctx.instruction(RemedyKey::GypsumPhosphorus),
                ctx.instruction(dap)
            ),
            simplified,
        )
    } else {
        action(
            ctx,
            priority,
            p,
            &[dap],
            format!(
                "Available phosphorus {} ppm is {} (optimal 20-50 ppm). Apply {} banded \
                 near the root zone.",
                value,
                severity,
                ctx.instruction(dap)
            ),
            simplified,
        )
    }
}

fn potassium(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Potassium;
    if value < 100.0 {
        action(
            ctx,
            Priority::Critical,
            p,
            &[RemedyKey::MopSevere],
            format!(
                "Available potassium {} ppm is very low (optimal 150-300 ppm). Apply {} \
                 before bud break; potassium drives berry size and sugar accumulation.",
                value,
                ctx.instruction(RemedyKey::MopSevere)
            ),
            "Your vines are badly short of potash. Apply MOP before bud break.",
        )
    } else if value < 150.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::Mop],
            format!(
                "Available potassium {} ppm is low (optimal 150-300 ppm). Apply {}.",
                value,
                ctx.instruction(RemedyKey::Mop)
            ),
            "Potash is low. Apply MOP.",
        )
    } else if POTASSIUM_OPTIMAL.contains(&value) {
        optimal(
            p,
            format!(
                "Available potassium {} ppm is within the optimal 150-300 ppm range.",
                value
            ),
            "Potash is at a good level.",
        )
    } else {
        savings(
            p,
            format!(
                "Available potassium {} ppm is high (above 300 ppm). Skip potassic \
                 fertilizer this season.",
                value
            ),
            "You have plenty of potash. Skip it this season and save money.",
        )
    }
}

fn calcium(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Calcium;
    if value < 1000.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::GypsumCalcium],
            format!(
                "Exchangeable calcium {} ppm is low (optimal above 1500 ppm). Apply {}.",
                value,
                ctx.instruction(RemedyKey::GypsumCalcium)
            ),
            "Calcium is low. Gypsum will supply it.",
        )
    } else if value < 1500.0 {
        watch(
            Priority::Moderate,
            p,
            format!(
                "Exchangeable calcium {} ppm is marginal (optimal above 1500 ppm).",
                value
            ),
            "Calcium is a bit low. Keep an eye on it.",
        )
    } else {
        optimal(
            p,
            format!("Exchangeable calcium {} ppm is adequate.", value),
            "Calcium is fine.",
        )
    }
}

fn magnesium(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Magnesium;
    if value < 120.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::MagnesiumSulphate],
            format!(
                "Exchangeable magnesium {} ppm is low (optimal 120-600 ppm). Apply {}.",
                value,
                ctx.instruction(RemedyKey::MagnesiumSulphate)
            ),
            "Magnesium is low. Apply magnesium sulphate.",
        )
    } else if value <= 600.0 {
        optimal(
            p,
            format!(
                "Exchangeable magnesium {} ppm is within the optimal 120-600 ppm range.",
                value
            ),
            "Magnesium is fine.",
        )
    } else {
        watch(
            Priority::Low,
            p,
            format!(
                "Exchangeable magnesium {} ppm is high (above 600 ppm) and may suppress \
                 potassium uptake.",
                value
            ),
            "Magnesium is high. Watch for potash shortage.",
        )
    }
}

fn sulfur(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Sulfur;
    if value < 10.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::BentoniteSulphur],
            format!(
                "Available sulfur {} ppm is low (optimal above 10 ppm). Apply {}.",
                value,
                ctx.instruction(RemedyKey::BentoniteSulphur)
            ),
            "Sulfur is low. Apply bentonite sulphur.",
        )
    } else {
        optimal(
            p,
            format!("Available sulfur {} ppm is adequate.", value),
            "Sulfur is fine.",
        )
    }
}

fn zinc(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Zinc;
    if value < 0.6 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::ZincSulphate],
            format!(
                "DTPA zinc {} ppm is deficient (critical level 0.6 ppm). Apply {}.",
                value,
                ctx.instruction(RemedyKey::ZincSulphate)
            ),
            "Zinc is low. Apply zinc sulphate to the soil.",
        )
    } else if value < 1.2 {
        watch(
            Priority::Moderate,
            p,
            format!(
                "DTPA zinc {} ppm is marginal (optimal above 1.2 ppm). Watch for little-leaf \
                 symptoms before flowering.",
                value
            ),
            "Zinc is borderline. Watch the young leaves.",
        )
    } else {
        optimal(
            p,
            format!("DTPA zinc {} ppm is adequate.", value),
            "Zinc is fine.",
        )
    }
}

fn iron(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Iron;
    if value < 4.5 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::FerrousSulphate],
            format!(
                "DTPA iron {} ppm is deficient (critical level 4.5 ppm). Apply {} mixed \
                 with farmyard manure.",
                value,
                ctx.instruction(RemedyKey::FerrousSulphate)
            ),
            "Iron is low. Leaves may turn yellow; apply ferrous sulphate.",
        )
    } else {
        optimal(
            p,
            format!("DTPA iron {} ppm is adequate.", value),
            "Iron is fine.",
        )
    }
}

fn manganese(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Manganese;
    if value < 2.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::ManganeseSulphate],
            format!(
                "DTPA manganese {} ppm is deficient (critical level 2.0 ppm). Apply {}.",
                value,
                ctx.instruction(RemedyKey::ManganeseSulphate)
            ),
            "Manganese is low. Apply manganese sulphate.",
        )
    } else {
        optimal(
            p,
            format!("DTPA manganese {} ppm is adequate.", value),
            "Manganese is fine.",
        )
    }
}

fn copper(value: f64, _ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Copper;
    if value < 0.2 {
        watch(
            Priority::Moderate,
            p,
            format!(
                "DTPA copper {} ppm is low (critical level 0.2 ppm). Copper fungicide \
                 sprays normally cover vine demand; confirm with a petiole test.",
                value
            ),
            "Copper is low, but regular copper sprays usually cover it.",
        )
    } else if value > 5.0 {
        watch(
            Priority::Low,
            p,
            format!(
                "DTPA copper {} ppm is accumulating (above 5.0 ppm), likely from repeated \
                 copper sprays. Rotate to non-copper fungicides where possible.",
                value
            ),
            "Copper is building up from sprays. Use fewer copper sprays.",
        )
    } else {
        optimal(
            p,
            format!("DTPA copper {} ppm is adequate.", value),
            "Copper is fine.",
        )
    }
}

fn boron(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Boron;
    if value < 0.5 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::Borax],
            format!(
                "Hot-water boron {} ppm is deficient (critical level 0.5 ppm). Apply {}; \
                 boron is essential for fruit set.",
                value,
                ctx.instruction(RemedyKey::Borax)
            ),
            "Boron is low. Apply borax to help the fruit set.",
        )
    } else if value > 2.0 {
        watch(
            Priority::High,
            p,
            format!(
                "Hot-water boron {} ppm is in the toxic range (above 2.0 ppm). Stop all \
                 boron-containing fertilizers and leach with good-quality water.",
                value
            ),
            "Boron is too high and can harm the vines. Stop using boron products.",
        )
    } else {
        optimal(
            p,
            format!("Hot-water boron {} ppm is within the safe 0.5-2.0 ppm range.", value),
            "Boron is fine.",
        )
    }
}

fn sodium(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Sodium;
    if value > 460.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::GypsumSodic],
            format!(
                "Exchangeable sodium {} ppm is high (above 460 ppm) and will disperse soil \
                 structure. Apply {} and leach.",
                value,
                ctx.instruction(RemedyKey::GypsumSodic)
            ),
            "Too much sodium is damaging the soil. Apply gypsum and water deeply.",
        )
    } else if value > 230.0 {
        watch(
            Priority::Moderate,
            p,
            format!(
                "Exchangeable sodium {} ppm is elevated (230-460 ppm). Check irrigation \
                 water sodium adsorption ratio.",
                value
            ),
            "Sodium is rising. Check your water.",
        )
    } else {
        optimal(
            p,
            format!("Exchangeable sodium {} ppm is within the safe range.", value),
            "Sodium is fine.",
        )
    }
}

fn chloride(value: f64, _ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Chloride;
    if value > 10.0 {
        watch(
            Priority::High,
            p,
            format!(
                "Chloride {} meq/L is in the toxic range for grapevines (above 10 meq/L). \
                 Avoid MOP; use sulphate-based potash and leach the root zone.",
                value
            ),
            "Chloride is high enough to burn leaves. Avoid chloride fertilizers.",
        )
    } else if value > 5.0 {
        watch(
            Priority::Moderate,
            p,
            format!(
                "Chloride {} meq/L is elevated (5-10 meq/L). Monitor leaf margins for \
                 scorch.",
                value
            ),
            "Chloride is a bit high. Watch leaf edges for burning.",
        )
    } else {
        optimal(
            p,
            format!("Chloride {} meq/L is within the safe range.", value),
            "Chloride is fine.",
        )
    }
}

fn bicarbonate(value: f64, _ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Bicarbonate;
    if value > 5.0 {
        watch(
            Priority::High,
            p,
            format!(
                "Bicarbonate {} meq/L is high (above 5.0 meq/L) and will induce iron \
                 chlorosis. Acidify irrigation water to pH 6.5.",
                value
            ),
            "Bicarbonate is high. Treat your irrigation water with acid.",
        )
    } else if value > 3.0 {
        watch(
            Priority::Moderate,
            p,
            format!("Bicarbonate {} meq/L is elevated (3.0-5.0 meq/L).", value),
            "Bicarbonate is a bit high. Keep watching.",
        )
    } else {
        optimal(
            p,
            format!("Bicarbonate {} meq/L is within the safe range.", value),
            "Bicarbonate is fine.",
        )
    }
}

fn carbonate(value: f64, _ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Carbonate;
    if value > 1.0 {
        watch(
            Priority::Moderate,
            p,
            format!(
                "Carbonate {} meq/L is present (above 1.0 meq/L), indicating free lime or \
                 sodic conditions.",
                value
            ),
            "Carbonate is present. Check soil for free lime.",
        )
    } else {
        optimal(
            p,
            format!("Carbonate {} meq/L is negligible.", value),
            "Carbonate is fine.",
        )
    }
}
