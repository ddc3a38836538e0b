//! Soil and petiole lab-test interpretation for vineyards.
//!
//! Raw lab values are normalized into a typed parameter map, validated against
//! plausible ranges, assessed by per-parameter threshold rules, sorted by
//! priority, and turned into a growth-stage-aware fertilizer plan. Every step
//! is a pure function of its inputs.

pub mod config;
pub mod error;
pub mod logic;
pub mod models;

pub use error::{LabError, Result};
pub use logic::{
    check_test_reminders, generate_fertilizer_plan, generate_petiole_test_recommendations,
    generate_soil_test_recommendations, Analysis, EngineTables, LabEngine,
};
pub use models::{
    FertilizerPlanItem, Parameter, ParameterMap, Priority, Recommendation, RecommendationKind,
    TestRecord, TestType,
};
