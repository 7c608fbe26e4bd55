//! Employee directory: domain input, listing query, repository and service.

pub mod domain;
pub mod query;
pub mod repository;
pub mod service;

pub use domain::EmployeeInput;
pub use query::{EmployeeQuery, ListParams};
pub use repository::{EmployeeRepository, SeaOrmEmployeeRepository};
pub use service::{EmployeePage, EmployeeService, QueryPolicy};
