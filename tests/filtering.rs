use hrdash::application::Store;
use hrdash::domain::{Department, Employee, EmployeeQuery, Rating};

fn employee(id: u32, last_name: &str, department: Department, rating: u8) -> Employee {
    Employee {
        id,
        first_name: "Sam".to_string(),
        last_name: last_name.to_string(),
        email: format!("sam{id}@example.com"),
        age: 40,
        department,
        rating: Rating::new(rating).unwrap(),
    }
}

fn visible(store: &Store, employees: &[Employee]) -> Vec<u32> {
    let state = store.state();
    EmployeeQuery::new(&state.search_query, &state.filters)
        .apply(employees)
        .iter()
        .map(|e| e.id)
        .collect()
}

#[test]
fn department_filter_through_store() {
    let employees = vec![
        employee(1, "Ames", Department::Engineering, 3),
        employee(2, "Boyd", Department::HR, 3),
    ];
    let mut store = Store::new();
    store.set_filters([Department::Engineering], []);
    assert_eq!(visible(&store, &employees), vec![1]);
}

#[test]
fn rating_filter_through_store() {
    let employees = vec![
        employee(1, "Ames", Department::Sales, 3),
        employee(2, "Boyd", Department::Sales, 5),
    ];
    let mut store = Store::new();
    store.set_filters([], [Rating::new(5).unwrap()]);
    assert_eq!(visible(&store, &employees), vec![2]);
}

#[test]
fn search_is_case_insensitive_through_store() {
    let employees = vec![
        employee(1, "Smith", Department::Design, 2),
        employee(2, "Jones", Department::Design, 2),
    ];
    let mut store = Store::new();
    store.set_search_query("smith");
    assert_eq!(visible(&store, &employees), vec![1]);
    store.set_search_query("");
    assert_eq!(visible(&store, &employees), vec![1, 2]);
}
