//! Search and filter evaluation over the loaded employee list.

use super::models::{Employee, FilterSet};

/// A search text plus filter set, evaluated against employees.
///
/// Search is a case-insensitive substring test over first name, last name,
/// email and department name. An empty query matches every employee.
///
/// # Examples
///
/// ```
/// use hrdash::domain::{Department, Employee, EmployeeQuery, FilterSet, Rating};
///
/// let smith = Employee {
///     id: 1,
///     first_name: "Jo".to_string(),
///     last_name: "Smith".to_string(),
///     email: "jo@example.com".to_string(),
///     age: 41,
///     department: Department::HR,
///     rating: Rating::new(3).unwrap(),
/// };
/// let filters = FilterSet::default();
/// assert!(EmployeeQuery::new("smith", &filters).matches(&smith));
/// assert!(EmployeeQuery::new("hr", &filters).matches(&smith));
/// assert!(!EmployeeQuery::new("jones", &filters).matches(&smith));
/// ```
#[derive(Debug, Clone)]
pub struct EmployeeQuery<'a> {
    needle: String,
    filters: &'a FilterSet,
}

impl<'a> EmployeeQuery<'a> {
    pub fn new(search: &str, filters: &'a FilterSet) -> Self {
        Self {
            needle: search.to_lowercase(),
            filters,
        }
    }

    pub fn matches_search(&self, employee: &Employee) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [
            employee.first_name.as_str(),
            employee.last_name.as_str(),
            employee.email.as_str(),
            employee.department.name(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.needle))
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.matches_search(employee) && self.filters.matches(employee)
    }

    /// Employees that pass both search and filters, in input order.
    pub fn apply<'e>(&self, employees: &'e [Employee]) -> Vec<&'e Employee> {
        employees.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, Rating};

    fn employee(id: u32, last_name: &str, department: Department, rating: u8) -> Employee {
        Employee {
            id,
            first_name: format!("First{id}"),
            last_name: last_name.to_string(),
            email: format!("{}@example.com", last_name.to_lowercase()),
            age: 30,
            department,
            rating: Rating::new(rating).unwrap(),
        }
    }

    #[test]
    fn test_empty_query_matches_all() {
        let filters = FilterSet::default();
        let list = vec![
            employee(1, "Smith", Department::HR, 1),
            employee(2, "Jones", Department::Sales, 5),
        ];
        assert_eq!(EmployeeQuery::new("", &filters).apply(&list).len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filters = FilterSet::default();
        let smith = employee(1, "Smith", Department::HR, 3);
        assert!(EmployeeQuery::new("smith", &filters).matches(&smith));
        assert!(EmployeeQuery::new("SMI", &filters).matches(&smith));
    }

    #[test]
    fn test_search_covers_email_and_department() {
        let filters = FilterSet::default();
        let emp = employee(1, "Nguyen", Department::Engineering, 3);
        assert!(EmployeeQuery::new("nguyen@", &filters).matches(&emp));
        assert!(EmployeeQuery::new("engin", &filters).matches(&emp));
        assert!(EmployeeQuery::new("first1", &filters).matches(&emp));
        assert!(!EmployeeQuery::new("marketing", &filters).matches(&emp));
    }

    #[test]
    fn test_search_text_is_not_trimmed() {
        let filters = FilterSet::default();
        let emp = employee(1, "Smith", Department::HR, 3);
        assert!(!EmployeeQuery::new(" smith", &filters).matches(&emp));
    }

    #[test]
    fn test_department_filter_keeps_only_selected() {
        let filters = FilterSet::new([Department::Engineering], []);
        let list = vec![
            employee(1, "A", Department::Engineering, 3),
            employee(2, "B", Department::HR, 3),
            employee(3, "C", Department::Engineering, 1),
        ];
        let ids: Vec<u32> = EmployeeQuery::new("", &filters)
            .apply(&list)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_rating_filter() {
        let filters = FilterSet::new([], [Rating::new(5).unwrap()]);
        let query = EmployeeQuery::new("", &filters);
        assert!(!query.matches(&employee(1, "A", Department::HR, 3)));
        assert!(query.matches(&employee(2, "B", Department::HR, 5)));
    }

    #[test]
    fn test_search_and_filters_combine() {
        let filters = FilterSet::new([Department::Sales], []);
        let list = vec![
            employee(1, "Smith", Department::Sales, 3),
            employee(2, "Smith", Department::HR, 3),
            employee(3, "Jones", Department::Sales, 3),
        ];
        let hits = EmployeeQuery::new("smith", &filters).apply(&list);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }
}
