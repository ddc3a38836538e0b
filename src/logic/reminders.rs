use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const SOIL_TEST_INTERVAL_DAYS: i64 = 730;
pub const PETIOLE_TEST_INTERVAL_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderIntervals {
    pub soil_days: i64,
    pub petiole_days: i64,
}

impl Default for ReminderIntervals {
    fn default() -> Self {
        Self {
            soil_days: SOIL_TEST_INTERVAL_DAYS,
            petiole_days: PETIOLE_TEST_INTERVAL_DAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReminders {
    pub soil_test_needed: bool,
    pub petiole_test_needed: bool,
}

/// Whether new tests are due, given the age in days of the latest of each kind.
/// `None` means no prior test exists.
pub fn check_test_reminders(
    soil_age_days: Option<i64>,
    petiole_age_days: Option<i64>,
    intervals: &ReminderIntervals,
) -> TestReminders {
    TestReminders {
        soil_test_needed: is_due(soil_age_days, intervals.soil_days),
        petiole_test_needed: is_due(petiole_age_days, intervals.petiole_days),
    }
}

fn is_due(age_days: Option<i64>, interval_days: i64) -> bool {
    age_days.map_or(true, |age| age > interval_days)
}

/// Whole days from `test_date` to the caller-supplied `today`.
pub fn days_since(test_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - test_date).num_days()
}
