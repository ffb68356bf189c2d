use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};

/// Departments an employee can be assigned to.
///
/// The upstream data source has no department field, so every loaded
/// employee gets one of these drawn by a [`Synthesizer`](super::Synthesizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Marketing,
    HR,
    Finance,
    Sales,
    Product,
    Design,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::Engineering,
        Department::Marketing,
        Department::HR,
        Department::Finance,
        Department::Sales,
        Department::Product,
        Department::Design,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::HR => "HR",
            Department::Finance => "Finance",
            Department::Sales => "Sales",
            Department::Product => "Product",
            Department::Design => "Design",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Department {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Department::ALL
            .into_iter()
            .find(|dept| dept.name() == s)
            .ok_or_else(|| DomainError::UnknownDepartment(s.to_string()))
    }
}

/// A performance rating in the closed range 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> DomainResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(DomainError::InvalidRating(i64::from(value)))
        }
    }

    /// Builds a rating from an arbitrary integer, saturating at the bounds.
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Rating(bounded as u8)
    }

    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> DomainResult<Self> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employee identity and contact fields as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street line.
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} {}", self.address, self.city, self.state, self.postal_code)
    }
}

/// A single record from the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetailRecord {
    #[serde(flatten)]
    pub base: EmployeeRecord,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub address: Address,
}

/// An employee as shown by the dashboard: upstream fields plus the locally
/// synthesized department and rating.
///
/// Bookmark status is deliberately absent; it is always derived from the
/// store at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub department: Department,
    pub rating: Rating,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Frozen copy of an employee taken when it was bookmarked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkedEmployee {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub department: Department,
    pub rating: Rating,
    pub bookmarked: bool,
}

impl BookmarkedEmployee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&Employee> for BookmarkedEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            age: employee.age,
            department: employee.department,
            rating: employee.rating,
            bookmarked: false,
        }
    }
}

/// Department and rating restrictions.
///
/// An empty set places no restriction on its field. Within a field the
/// selected values are OR-ed; the two fields are AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub department: BTreeSet<Department>,
    pub rating: BTreeSet<Rating>,
}

impl FilterSet {
    pub fn new(
        department: impl IntoIterator<Item = Department>,
        rating: impl IntoIterator<Item = Rating>,
    ) -> Self {
        Self {
            department: department.into_iter().collect(),
            rating: rating.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.department.is_empty() && self.rating.is_empty()
    }

    /// Number of selected values across both fields.
    pub fn active_count(&self) -> usize {
        self.department.len() + self.rating.len()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        let department_ok =
            self.department.is_empty() || self.department.contains(&employee.department);
        let rating_ok = self.rating.is_empty() || self.rating.contains(&employee.rating);
        department_ok && rating_ok
    }
}

/// One year of synthesized performance history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearReview {
    pub year: i32,
    pub rating: Rating,
    pub review: &'static str,
}

/// Everything the detail view shows for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub employee: Employee,
    pub phone: String,
    pub image: String,
    pub address: Address,
    pub bio: &'static str,
    pub history: Vec<YearReview>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(department: Department, rating: u8) -> Employee {
        Employee {
            id: 1,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            age: 30,
            department,
            rating: Rating::new(rating).unwrap(),
        }
    }

    #[test]
    fn test_department_round_trips_through_name() {
        for dept in Department::ALL {
            assert_eq!(dept.name().parse::<Department>().unwrap(), dept);
        }
        assert_eq!(
            "Legal".parse::<Department>(),
            Err(DomainError::UnknownDepartment("Legal".to_string()))
        );
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert_eq!(Rating::clamped(-3).value(), 1);
        assert_eq!(Rating::clamped(9).value(), 5);
        assert_eq!(Rating::all().count(), 5);
    }

    #[test]
    fn test_rating_rejected_when_deserialized_out_of_range() {
        assert!(serde_json::from_str::<Rating>("7").is_err());
        assert_eq!(serde_json::from_str::<Rating>("2").unwrap().value(), 2);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filters = FilterSet::default();
        assert!(filters.is_empty());
        assert!(filters.matches(&employee(Department::Sales, 1)));
    }

    #[test]
    fn test_filter_is_or_within_and_across_fields() {
        let filters = FilterSet::new(
            [Department::Engineering, Department::HR],
            [Rating::new(4).unwrap()],
        );
        assert_eq!(filters.active_count(), 3);
        assert!(filters.matches(&employee(Department::HR, 4)));
        assert!(filters.matches(&employee(Department::Engineering, 4)));
        assert!(!filters.matches(&employee(Department::HR, 3)));
        assert!(!filters.matches(&employee(Department::Sales, 4)));
    }

    #[test]
    fn test_snapshot_copies_fields() {
        let emp = employee(Department::Design, 2);
        let snapshot = BookmarkedEmployee::from(&emp);
        assert_eq!(snapshot.id, emp.id);
        assert_eq!(snapshot.full_name(), "Ann Lee");
        assert_eq!(snapshot.department, Department::Design);
        assert_eq!(snapshot.rating.value(), 2);
    }

    #[test]
    fn test_detail_record_decodes_flattened_fields() {
        let json = r#"{
            "id": 5, "firstName": "Emily", "lastName": "Johnson",
            "email": "emily.johnson@x.dummyjson.com", "age": 28,
            "phone": "+81 965-431-3024", "image": "https://dummyjson.com/icon/emilys/128",
            "address": {"address": "626 Main Street", "city": "Phoenix",
                        "state": "Mississippi", "postalCode": "29112", "country": "United States"},
            "bloodGroup": "O-"
        }"#;
        let record: EmployeeDetailRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.base.id, 5);
        assert_eq!(record.base.first_name, "Emily");
        assert_eq!(record.address.postal_code, "29112");
        assert_eq!(
            record.address.to_string(),
            "626 Main Street, Phoenix, Mississippi 29112"
        );
    }
}
