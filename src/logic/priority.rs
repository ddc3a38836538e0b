use crate::models::Recommendation;

/// Order recommendations from critical to optimal. Ties keep emission order.
pub fn sort_by_priority(mut recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    // sort_by_key is stable
    recommendations.sort_by_key(|r| r.priority.rank());
    recommendations
}

pub fn is_priority_ordered(recommendations: &[Recommendation]) -> bool {
    recommendations
        .windows(2)
        .all(|pair| pair[0].priority.rank() <= pair[1].priority.rank())
}
