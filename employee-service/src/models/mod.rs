//! Domain models for employee-service.

mod employee;

pub use employee::{
    Employee, EmployeeChanges, EmployeeFilter, EmployeePage, EmployeeStatus, NewEmployee,
    PageRequest,
};
