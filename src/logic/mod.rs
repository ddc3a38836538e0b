pub mod dosage;
pub mod engine;
pub mod normalize;
pub mod plan;
pub mod priority;
pub mod reminders;
pub mod rules;
pub mod validation;

pub use engine::{
    check_test_reminders, generate_fertilizer_plan, generate_petiole_test_recommendations,
    generate_soil_test_recommendations, Analysis, EngineTables, LabEngine,
};
pub use rules::RulesEngine;
