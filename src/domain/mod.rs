//! Domain layer - Core business entities and logic
//!
//! Employee records and password handling, independent of the web and
//! persistence layers.

pub mod employee;
pub mod password;

pub use employee::{
    CurrentUser, DepartmentFilter, Employee, EmployeeRecord, EmployeeResponse, NewEmployee,
};
pub use password::{
    calculate_password_strength, hash_password, is_password_expired, verify_password,
    CredentialHash, PasswordPolicy, PasswordRequirements, PasswordStrength, PASSWORD_POLICY,
};
