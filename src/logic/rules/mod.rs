pub mod engine;
pub mod petiole;
pub mod soil;

pub use engine::RulesEngine;

use crate::logic::dosage::DosageTable;
use crate::models::{
    Parameter, ParameterMap, Priority, Recommendation, RecommendationKind, RemedyKey,
};

/// Everything a rule may read while assessing one parameter.
pub struct RuleContext<'a> {
    pub parameters: &'a ParameterMap,
    pub remedies: &'a DosageTable,
}

impl<'a> RuleContext<'a> {
    pub fn new(parameters: &'a ParameterMap, remedies: &'a DosageTable) -> Self {
        Self {
            parameters,
            remedies,
        }
    }

    /// "Product at dosage" for a remedy, or a generic instruction if the table lacks it.
    pub fn instruction(&self, key: RemedyKey) -> String {
        match self.remedies.get(key) {
            Some(entry) => entry.instruction(),
            None => "a suitable corrective product at the locally recommended rate".to_string(),
        }
    }

    /// Attach the remedies the table knows about to a recommendation.
    pub fn attach(&self, mut rec: Recommendation, keys: &[RemedyKey]) -> Recommendation {
        for key in keys {
            if self.remedies.get(*key).is_some() {
                rec = rec.with_remedy(*key);
            }
        }
        rec
    }
}

/// Trait for per-parameter lab rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Parameter this rule assesses
    fn parameter(&self) -> Parameter;

    /// Evaluate the rule. Absent parameters yield `None`; present ones always
    /// yield exactly one recommendation.
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation>;
}

/// A rule expressed as an ordered cascade over one parameter's value.
pub struct ThresholdRule {
    id: &'static str,
    parameter: Parameter,
    assess: fn(f64, &RuleContext<'_>) -> Recommendation,
}

impl ThresholdRule {
    pub const fn new(
        id: &'static str,
        parameter: Parameter,
        assess: fn(f64, &RuleContext<'_>) -> Recommendation,
    ) -> Self {
        Self {
            id,
            parameter,
            assess,
        }
    }
}

impl Rule for ThresholdRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn parameter(&self) -> Parameter {
        self.parameter
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let value = ctx.parameters.get(self.parameter)?;
        Some((self.assess)(value, ctx))
    }
}

pub(crate) fn optimal(parameter: Parameter, technical: String, simplified: &str) -> Recommendation {
    Recommendation::new(
        Priority::Optimal,
        RecommendationKind::Optimal,
        parameter.label(),
        technical,
        simplified,
    )
}

pub(crate) fn watch(
    priority: Priority,
    parameter: Parameter,
    technical: String,
    simplified: &str,
) -> Recommendation {
    Recommendation::new(
        priority,
        RecommendationKind::Watch,
        parameter.label(),
        technical,
        simplified,
    )
}

pub(crate) fn savings(parameter: Parameter, technical: String, simplified: &str) -> Recommendation {
    Recommendation::new(
        Priority::Low,
        RecommendationKind::Savings,
        parameter.label(),
        technical,
        simplified,
    )
}

pub(crate) fn action(
    ctx: &RuleContext<'_>,
    priority: Priority,
    parameter: Parameter,
    remedies: &[RemedyKey],
    technical: String,
    simplified: &str,
) -> Recommendation {
    let rec = Recommendation::new(
        priority,
        RecommendationKind::Action,
        parameter.label(),
        technical,
        simplified,
    );
    ctx.attach(rec, remedies)
}
