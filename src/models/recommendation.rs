use serde::{Deserialize, Serialize};

use super::RemedyKey;

/// Recommendation priority. Declaration order is the resolver's total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Moderate,
    Low,
    Optimal,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Moderate => "moderate",
            Priority::Low => "low",
            Priority::Optimal => "optimal",
        }
    }

    /// Position in the total order, 0 being the most urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Moderate => 2,
            Priority::Low => 3,
            Priority::Optimal => 4,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Priority::Critical => "!!",
            Priority::High => "!",
            Priority::Moderate => "⚠",
            Priority::Low => "→",
            Priority::Optimal => "✓",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Action,
    Watch,
    Optimal,
    Savings,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Action => "action",
            RecommendationKind::Watch => "watch",
            RecommendationKind::Optimal => "optimal",
            RecommendationKind::Savings => "savings",
        }
    }
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display icon tag for UI clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    AlertCircle,
    AlertTriangle,
    Eye,
    CheckCircle,
    PiggyBank,
}

impl Icon {
    pub fn for_finding(priority: Priority, kind: RecommendationKind) -> Self {
        match (priority, kind) {
            (_, RecommendationKind::Optimal) => Icon::CheckCircle,
            (_, RecommendationKind::Savings) => Icon::PiggyBank,
            (Priority::Critical, _) => Icon::AlertCircle,
            (Priority::High, RecommendationKind::Action) => Icon::AlertTriangle,
            _ => Icon::Eye,
        }
    }
}

/// Parameter name used by the synthetic validation-failure recommendation.
pub const DATA_QUALITY: &str = "Data Quality";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub parameter: String,
    pub technical: String,
    pub simplified: String,
    pub icon: Icon,
    /// Structured remedies behind the technical text, when produced by a rule set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remedies: Vec<RemedyKey>,
}

impl Recommendation {
    pub fn new(
        priority: Priority,
        kind: RecommendationKind,
        parameter: impl Into<String>,
        technical: impl Into<String>,
        simplified: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            kind,
            parameter: parameter.into(),
            technical: technical.into(),
            simplified: simplified.into(),
            icon: Icon::for_finding(priority, kind),
            remedies: Vec::new(),
        }
    }

    pub fn with_remedy(mut self, remedy: RemedyKey) -> Self {
        self.remedies.push(remedy);
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    /// Whether this finding is eligible for the immediate plan phase.
    pub fn is_urgent_action(&self) -> bool {
        self.kind == RecommendationKind::Action
            && matches!(self.priority, Priority::Critical | Priority::High)
    }

    pub fn is_data_quality(&self) -> bool {
        self.parameter == DATA_QUALITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_total() {
        let ordered = [
            Priority::Critical,
            Priority::High,
            Priority::Moderate,
            Priority::Low,
            Priority::Optimal,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn icon_follows_priority_and_kind() {
        let rec = Recommendation::new(
            Priority::Critical,
            RecommendationKind::Action,
            "pH",
            "t",
            "s",
        );
        assert_eq!(rec.icon, Icon::AlertCircle);

        let rec = Recommendation::new(
            Priority::Optimal,
            RecommendationKind::Optimal,
            "pH",
            "t",
            "s",
        );
        assert_eq!(rec.icon, Icon::CheckCircle);

        let rec = Recommendation::new(
            Priority::Low,
            RecommendationKind::Savings,
            "Potassium",
            "t",
            "s",
        );
        assert_eq!(rec.icon, Icon::PiggyBank);
    }

    #[test]
    fn urgent_action_requires_priority_and_kind() {
        let high_action =
            Recommendation::new(Priority::High, RecommendationKind::Action, "N", "t", "s");
        let high_watch =
            Recommendation::new(Priority::High, RecommendationKind::Watch, "N", "t", "s");
        let moderate_action =
            Recommendation::new(Priority::Moderate, RecommendationKind::Action, "N", "t", "s");

        assert!(high_action.is_urgent_action());
        assert!(!high_watch.is_urgent_action());
        assert!(!moderate_action.is_urgent_action());
    }

    #[test]
    fn deserializes_without_remedies() {
        let json = r#"{
            "priority": "high",
            "type": "action",
            "parameter": "Nitrogen",
            "technical": "Apply urea at 25-30 kg/acre",
            "simplified": "Add nitrogen",
            "icon": "alert-triangle"
        }"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.kind, RecommendationKind::Action);
        assert!(rec.remedies.is_empty());
    }
}
