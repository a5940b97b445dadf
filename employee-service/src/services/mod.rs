pub mod database;
pub mod memory;
pub mod repository;

pub use database::Database;
pub use memory::MemoryRepository;
pub use repository::EmployeeRepository;
