use super::errors::FetchResult;
use super::models::{EmployeeDetailRecord, EmployeeRecord};

/// Read-only collection of employee records.
///
/// Implementations are shared across the worker threads that run fetches.
pub trait EmployeeSource: Send + Sync {
    /// Up to `limit` records from the start of the collection.
    fn list_employees(&self, limit: usize) -> FetchResult<Vec<EmployeeRecord>>;

    /// A single record with contact details.
    fn employee_detail(&self, id: u32) -> FetchResult<EmployeeDetailRecord>;
}
