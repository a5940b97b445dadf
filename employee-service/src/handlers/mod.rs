pub mod employees;
pub mod ping;

pub use employees::{
    create_employee, destroy_employee, list_employees, show_employee, update_employee,
};
pub use ping::ping;
