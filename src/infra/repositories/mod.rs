//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod employee_repository;
pub(crate) mod entities;

pub use employee_repository::{EmployeeRepository, EmployeeStore};

#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
