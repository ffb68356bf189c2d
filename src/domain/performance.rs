//! Mock profile content for the employee detail view.

use super::models::{EmployeeDetailRecord, EmployeeProfile, Rating, YearReview};
use super::synth::{Synthesizer, enrich};

pub const HISTORY_YEARS: i32 = 5;

pub const BIO: &str = "Dedicated professional with a passion for innovation and problem-solving. \
Consistently delivers high-quality work and collaborates effectively with cross-functional teams.";

pub const SKILLS: [&str; 6] = [
    "Communication",
    "Leadership",
    "Problem Solving",
    "Teamwork",
    "Time Management",
    "Technical Knowledge",
];

pub const RESPONSIBILITIES: [&str; 5] = [
    "Lead team meetings and project planning sessions",
    "Develop and implement department strategies",
    "Mentor junior team members",
    "Collaborate with cross-functional teams",
    "Report on key performance metrics",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub name: &'static str,
    pub status: &'static str,
    pub completion: u8,
}

pub const PROJECTS: [Project; 4] = [
    Project { name: "Website Redesign", status: "In Progress", completion: 75 },
    Project { name: "Employee Onboarding System", status: "Completed", completion: 100 },
    Project { name: "Performance Review Tool", status: "Planning", completion: 20 },
    Project { name: "HR Policy Update", status: "In Review", completion: 90 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub from: &'static str,
    pub role: &'static str,
    pub date: &'static str,
    pub content: &'static str,
}

pub const FEEDBACK: [Feedback; 3] = [
    Feedback {
        from: "Jane Smith",
        role: "Manager",
        date: "2023-04-15",
        content: "Excellent communication skills and team collaboration.",
    },
    Feedback {
        from: "John Doe",
        role: "Peer",
        date: "2023-03-22",
        content: "Always willing to help others and share knowledge.",
    },
    Feedback {
        from: "Sarah Johnson",
        role: "Director",
        date: "2023-02-10",
        content: "Consistently delivers high-quality work ahead of schedule.",
    },
];

pub fn review_text(rating: Rating) -> &'static str {
    match rating.value() {
        1 => "Needs significant improvement in core responsibilities.",
        2 => "Meeting some expectations but improvement needed.",
        3 => "Consistently meets expectations and requirements.",
        4 => "Exceeds expectations in most areas.",
        _ => "Outstanding performance across all responsibilities.",
    }
}

/// Ratings for `current_year` and the preceding years, newest first.
///
/// Each year drifts from `rating` by at most one step and stays within 1-5.
pub fn performance_history(
    rating: Rating,
    current_year: i32,
    synth: &mut dyn Synthesizer,
) -> Vec<YearReview> {
    (0..HISTORY_YEARS)
        .map(|offset| {
            let drift = synth.between(-1, 1);
            let year_rating = Rating::clamped(i64::from(rating.value()) + drift);
            YearReview {
                year: current_year - offset,
                rating: year_rating,
                review: review_text(year_rating),
            }
        })
        .collect()
}

/// Builds the detail view model from a fetched record.
pub fn build_profile(
    record: EmployeeDetailRecord,
    current_year: i32,
    synth: &mut dyn Synthesizer,
) -> EmployeeProfile {
    let EmployeeDetailRecord { base, phone, image, address } = record;
    let employee = enrich(base, synth);
    let history = performance_history(employee.rating, current_year, synth);
    EmployeeProfile {
        employee,
        phone,
        image,
        address,
        bio: BIO,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synth::testing::ScriptedSynthesizer;
    use crate::domain::{Address, Department, EmployeeRecord, RngSynthesizer};

    #[test]
    fn test_review_text_per_rating() {
        assert_eq!(
            review_text(Rating::new(1).unwrap()),
            "Needs significant improvement in core responsibilities."
        );
        assert_eq!(
            review_text(Rating::new(5).unwrap()),
            "Outstanding performance across all responsibilities."
        );
    }

    #[test]
    fn test_history_covers_five_years_newest_first() {
        let mut synth = ScriptedSynthesizer::new([0, 0, 0, 0, 0]);
        let history = performance_history(Rating::new(3).unwrap(), 2026, &mut synth);
        let years: Vec<i32> = history.iter().map(|h| h.year).collect();
        assert_eq!(years, vec![2026, 2025, 2024, 2023, 2022]);
        assert!(history.iter().all(|h| h.rating.value() == 3));
    }

    #[test]
    fn test_history_drift_is_clamped() {
        let mut synth = ScriptedSynthesizer::new([1, 1, -1, 0, 1]);
        let history = performance_history(Rating::new(5).unwrap(), 2026, &mut synth);
        let ratings: Vec<u8> = history.iter().map(|h| h.rating.value()).collect();
        assert_eq!(ratings, vec![5, 5, 4, 5, 5]);

        let mut synth = ScriptedSynthesizer::new([-1, 0]);
        let history = performance_history(Rating::new(1).unwrap(), 2026, &mut synth);
        assert_eq!(history[0].rating.value(), 1);
        assert_eq!(history[0].review, review_text(history[0].rating));
    }

    #[test]
    fn test_history_stays_within_one_step() {
        let mut synth = RngSynthesizer::seeded(3);
        for base in Rating::all() {
            for review in performance_history(base, 2026, &mut synth) {
                let diff = i16::from(review.rating.value()) - i16::from(base.value());
                assert!(diff.abs() <= 1);
            }
        }
    }

    #[test]
    fn test_build_profile() {
        let record = EmployeeDetailRecord {
            base: EmployeeRecord {
                id: 9,
                first_name: "Ann".to_string(),
                last_name: "Lee".to_string(),
                email: "ann@example.com".to_string(),
                age: 33,
            },
            phone: "+1 555".to_string(),
            image: String::new(),
            address: Address::default(),
        };
        // department Marketing, rating 4, then history drifts
        let mut synth = ScriptedSynthesizer::new([1, 4, 0, 0, 0, 0, 0]);
        let profile = build_profile(record, 2026, &mut synth);
        assert_eq!(profile.employee.department, Department::Marketing);
        assert_eq!(profile.employee.rating.value(), 4);
        assert_eq!(profile.history.len(), 5);
        assert_eq!(profile.phone, "+1 555");
        assert_eq!(profile.bio, BIO);
    }
}
