//! Petiole (leaf-stalk tissue) rules for in-season correction.
//!
//! Macronutrients are in % dry weight, micronutrients in ppm. Corrections are
//! delivered as fertigation or foliar sprays since the crop is already growing.

use super::{action, optimal, savings, watch, Rule, RuleContext, ThresholdRule};
use crate::models::{Parameter, Priority, Recommendation, RemedyKey};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ThresholdRule::new("petiole_nitrogen", Parameter::Nitrogen, nitrogen)),
        Box::new(ThresholdRule::new(
            "petiole_phosphorus",
            Parameter::Phosphorus,
            phosphorus,
        )),
        Box::new(ThresholdRule::new("petiole_potassium", Parameter::Potassium, potassium)),
        Box::new(ThresholdRule::new("petiole_calcium", Parameter::Calcium, calcium)),
        Box::new(ThresholdRule::new("petiole_magnesium", Parameter::Magnesium, magnesium)),
        Box::new(ThresholdRule::new("petiole_sulfur", Parameter::Sulfur, sulfur)),
        Box::new(ThresholdRule::new("petiole_zinc", Parameter::Zinc, zinc)),
        Box::new(ThresholdRule::new("petiole_iron", Parameter::Iron, iron)),
        Box::new(ThresholdRule::new("petiole_manganese", Parameter::Manganese, manganese)),
        Box::new(ThresholdRule::new("petiole_copper", Parameter::Copper, copper)),
        Box::new(ThresholdRule::new("petiole_boron", Parameter::Boron, boron)),
        Box::new(ThresholdRule::new("petiole_sodium", Parameter::Sodium, sodium)),
        Box::new(ThresholdRule::new("petiole_chloride", Parameter::Chloride, chloride)),
    ]
}

fn nitrogen(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Nitrogen;
    if value < 0.8 {
        action(
            ctx,
            Priority::Critical,
            p,
            &[RemedyKey::UreaFertigationSevere],
            format!(
                "Petiole nitrogen {}% is severely deficient (optimal 1.2-2.0%). Apply {} \
                 through fertigation, split over two weeks.",
                value,
                ctx.instruction(RemedyKey::UreaFertigationSevere)
            ),
            "The vines are badly short of nitrogen. Feed urea through the drip now.",
        )
    } else if value < 1.2 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::UreaFertigation],
            format!(
                "Petiole nitrogen {}% is low (optimal 1.2-2.0%). Apply {} through \
                 fertigation.",
                value,
                ctx.instruction(RemedyKey::UreaFertigation)
            ),
            "Nitrogen is low. Feed some urea through the drip.",
        )
    } else if value <= 2.0 {
        optimal(
            p,
            format!(
                "Petiole nitrogen {}% is within the optimal 1.2-2.0% range.",
                value
            ),
            "Nitrogen is at a good level.",
        )
    } else {
        watch(
            Priority::Moderate,
            p,
            format!(
                "Petiole nitrogen {}% is excessive (above 2.0%). Withhold nitrogen to curb \
                 vegetative vigour and reduce bunch rot risk.",
                value
            ),
            "The vines have too much nitrogen. Stop giving it for now.",
        )
    }
}

fn phosphorus(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Phosphorus;
    if value < 0.15 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::MapFertigation],
            format!(
                "Petiole phosphorus {}% is low (optimal 0.15-0.50%). Apply {} through \
                 fertigation.",
                value,
                ctx.instruction(RemedyKey::MapFertigation)
            ),
            "Phosphorus is low. Feed a phosphate fertilizer through the drip.",
        )
    } else if value <= 0.5 {
        optimal(
            p,
            format!(
                "Petiole phosphorus {}% is within the optimal 0.15-0.50% range.",
                value
            ),
            "Phosphorus is at a good level.",
        )
    } else {
        savings(
            p,
            format!(
                "Petiole phosphorus {}% is high (above 0.50%). Skip phosphatic fertilizer \
                 for the rest of the season.",
                value
            ),
            "There is plenty of phosphorus. Skip it and save money.",
        )
    }
}

fn potassium(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Potassium;
    if value < 1.0 {
        action(
            ctx,
            Priority::Critical,
            p,
            &[RemedyKey::SopFertigation],
            format!(
                "Petiole potassium {}% is severely deficient (optimal 1.5-2.5%). Apply {} \
                 through fertigation during berry development.",
                value,
                ctx.instruction(RemedyKey::SopFertigation)
            ),
            "The vines are badly short of potash. Feed potash through the drip now.",
        )
    } else if value < 1.5 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::SopFoliar],
            format!(
                "Petiole potassium {}% is low (optimal 1.5-2.5%). Spray {} as a foliar \
                 application, two sprays ten days apart.",
                value,
                ctx.instruction(RemedyKey::SopFoliar)
            ),
            "Potash is low. Spray potash on the leaves.",
        )
    } else if value <= 2.5 {
        optimal(
            p,
            format!(
                "Petiole potassium {}% is within the optimal 1.5-2.5% range.",
                value
            ),
            "Potash is at a good level.",
        )
    } else {
        savings(
            p,
            format!(
                "Petiole potassium {}% is high (above 2.5%). Skip potassic fertilizer for \
                 the rest of the season.",
                value
            ),
            "There is plenty of potash. Skip it and save money.",
        )
    }
}

fn calcium(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Calcium;
    if value < 1.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::CalciumNitrateFoliar],
            format!(
                "Petiole calcium {}% is low (optimal 1.0-3.0%). Spray {} as a foliar \
                 application to protect berry firmness.",
                value,
                ctx.instruction(RemedyKey::CalciumNitrateFoliar)
            ),
            "Calcium is low. Spray calcium nitrate on the leaves.",
        )
    } else if value <= 3.0 {
        optimal(
            p,
            format!("Petiole calcium {}% is within the optimal 1.0-3.0% range.", value),
            "Calcium is fine.",
        )
    } else {
        watch(
            Priority::Low,
            p,
            format!("Petiole calcium {}% is high (above 3.0%).", value),
            "Calcium is high. No action needed yet.",
        )
    }
}

fn magnesium(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Magnesium;
    if value < 0.3 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::MagnesiumSulphateFoliar],
            format!(
                "Petiole magnesium {}% is low (optimal 0.3-0.8%). Spray {} as a foliar \
                 application.",
                value,
                ctx.instruction(RemedyKey::MagnesiumSulphateFoliar)
            ),
            "Magnesium is low. Spray magnesium sulphate on the leaves.",
        )
    } else if value <= 0.8 {
        optimal(
            p,
            format!("Petiole magnesium {}% is within the optimal 0.3-0.8% range.", value),
            "Magnesium is fine.",
        )
    } else {
        watch(
            Priority::Low,
            p,
            format!(
                "Petiole magnesium {}% is high (above 0.8%) and may compete with potassium.",
                value
            ),
            "Magnesium is high. Watch for potash shortage.",
        )
    }
}

fn sulfur(value: f64, _ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Sulfur;
    if value < 0.1 {
        watch(
            Priority::Moderate,
            p,
            format!(
                "Petiole sulfur {}% is low (optimal above 0.1%). Switch to sulphate-based \
                 fertilizers for the next fertigation cycle.",
                value
            ),
            "Sulfur is a bit low. Use sulphate fertilizers next time.",
        )
    } else {
        optimal(
            p,
            format!("Petiole sulfur {}% is adequate.", value),
            "Sulfur is fine.",
        )
    }
}

fn zinc(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Zinc;
    if value < 25.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::ZincSulphateFoliar],
            format!(
                "Petiole zinc {} ppm is deficient (optimal 25-50 ppm). Spray {} as a \
                 foliar application before flowering.",
                value,
                ctx.instruction(RemedyKey::ZincSulphateFoliar)
            ),
            "Zinc is low. Spray zinc sulphate before flowering.",
        )
    } else {
        optimal(
            p,
            format!("Petiole zinc {} ppm is adequate.", value),
            "Zinc is fine.",
        )
    }
}

fn iron(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Iron;
    if value < 40.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::ChelatedIronFoliar],
            format!(
                "Petiole iron {} ppm is deficient (optimal above 40 ppm). Spray {} as a \
                 foliar application.",
                value,
                ctx.instruction(RemedyKey::ChelatedIronFoliar)
            ),
            "Iron is low and leaves may yellow. Spray chelated iron.",
        )
    } else {
        optimal(
            p,
            format!("Petiole iron {} ppm is adequate.", value),
            "Iron is fine.",
        )
    }
}

fn manganese(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Manganese;
    if value < 25.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::ManganeseSulphateFoliar],
            format!(
                "Petiole manganese {} ppm is deficient (optimal above 25 ppm). Spray {} as \
                 a foliar application.",
                value,
                ctx.instruction(RemedyKey::ManganeseSulphateFoliar)
            ),
            "Manganese is low. Spray manganese sulphate.",
        )
    } else {
        optimal(
            p,
            format!("Petiole manganese {} ppm is adequate.", value),
            "Manganese is fine.",
        )
    }
}

fn copper(value: f64, _ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Copper;
    if value < 5.0 {
        watch(
            Priority::Moderate,
            p,
            format!(
                "Petiole copper {} ppm is low (optimal above 5 ppm). A copper fungicide in \
                 the next spray round will cover demand.",
                value
            ),
            "Copper is low. Your next copper spray will fix it.",
        )
    } else {
        optimal(
            p,
            format!("Petiole copper {} ppm is adequate.", value),
            "Copper is fine.",
        )
    }
}

fn boron(value: f64, ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Boron;
    if value < 25.0 {
        action(
            ctx,
            Priority::High,
            p,
            &[RemedyKey::BoricAcidFoliar],
            format!(
                "Petiole boron {} ppm is deficient (optimal 25-100 ppm). Spray {} before \
                 flowering to secure fruit set.",
                value,
                ctx.instruction(RemedyKey::BoricAcidFoliar)
            ),
            "Boron is low. Spray boric acid before flowering.",
        )
    } else if value > 100.0 {
        watch(
            Priority::Critical,
            p,
            format!(
                "Petiole boron {} ppm is toxic (above 100 ppm). Stop all boron sprays and \
                 boron-containing fertilizers immediately.",
                value
            ),
            "Boron is at a harmful level. Stop all boron products now.",
        )
    } else {
        optimal(
            p,
            format!("Petiole boron {} ppm is within the optimal 25-100 ppm range.", value),
            "Boron is fine.",
        )
    }
}

fn sodium(value: f64, _ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Sodium;
    if value > 0.5 {
        watch(
            Priority::High,
            p,
            format!(
                "Petiole sodium {}% is toxic (above 0.5%). Check irrigation water and \
                 schedule a leaching irrigation.",
                value
            ),
            "Sodium is building up in the vines. Check your water.",
        )
    } else if value > 0.25 {
        watch(
            Priority::Moderate,
            p,
            format!("Petiole sodium {}% is elevated (0.25-0.5%).", value),
            "Sodium is a bit high. Keep watching.",
        )
    } else {
        optimal(
            p,
            format!("Petiole sodium {}% is within the safe range.", value),
            "Sodium is fine.",
        )
    }
}

fn chloride(value: f64, _ctx: &RuleContext<'_>) -> Recommendation {
    let p = Parameter::Chloride;
    if value > 1.0 {
        watch(
            Priority::High,
            p,
            format!(
                "Petiole chloride {}% is toxic (above 1.0%). Stop MOP, switch to sulphate \
                 of potash, and leach the root zone.",
                value
            ),
            "Chloride is high enough to burn leaves. Stop chloride fertilizers.",
        )
    } else if value > 0.5 {
        watch(
            Priority::Moderate,
            p,
            format!("Petiole chloride {}% is elevated (0.5-1.0%).", value),
            "Chloride is a bit high. Keep watching.",
        )
    } else {
        optimal(
            p,
            format!("Petiole chloride {}% is within the safe range.", value),
            "Chloride is fine.",
        )
    }
}
