//! Decorative analytics figures, regenerated each time the view opens.

use chrono::{Datelike, Months, NaiveDate};

use super::models::Department;
use super::synth::Synthesizer;

pub const TREND_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentRating {
    pub department: Department,
    /// Average rating with one decimal place, between 3.0 and 5.0.
    pub avg_rating: f64,
    pub employee_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTrend {
    /// Abbreviated month name, e.g. "Jan".
    pub month: String,
    pub bookmarks: u32,
    pub promotions: u32,
}

/// A fixed headline figure shown above the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub description: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

pub const SUMMARY_CARDS: [SummaryCard; 3] = [
    SummaryCard {
        title: "Total Employees",
        description: "Active employees in the system",
        value: "87",
        change: "+12% from last month",
    },
    SummaryCard {
        title: "Average Rating",
        description: "Overall employee performance",
        value: "3.8",
        change: "+0.3 from last quarter",
    },
    SummaryCard {
        title: "Promotions",
        description: "Last 6 months",
        value: "14",
        change: "+5 from previous period",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub department_ratings: Vec<DepartmentRating>,
    pub bookmark_trends: Vec<MonthTrend>,
}

impl AnalyticsReport {
    pub fn generate(today: NaiveDate, synth: &mut dyn Synthesizer) -> Self {
        Self {
            department_ratings: department_ratings(synth),
            bookmark_trends: bookmark_trends(today, synth),
        }
    }
}

pub fn department_ratings(synth: &mut dyn Synthesizer) -> Vec<DepartmentRating> {
    Department::ALL
        .into_iter()
        .map(|department| DepartmentRating {
            department,
            avg_rating: synth.between(30, 50) as f64 / 10.0,
            employee_count: synth.between(5, 24) as u32,
        })
        .collect()
}

/// One entry per month, oldest first, ending with the month of `today`.
pub fn bookmark_trends(today: NaiveDate, synth: &mut dyn Synthesizer) -> Vec<MonthTrend> {
    let first_of_month = today.with_day(1).unwrap_or(today);
    (0..TREND_MONTHS)
        .rev()
        .filter_map(|back| first_of_month.checked_sub_months(Months::new(back)))
        .map(|month| MonthTrend {
            month: month.format("%b").to_string(),
            bookmarks: synth.between(5, 14) as u32,
            promotions: synth.between(1, 5) as u32,
        })
        .collect()
}
