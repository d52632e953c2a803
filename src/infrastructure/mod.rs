pub mod memory;
pub mod models;
pub mod supplier_repo;

pub use memory::InMemoryUnitOfWork;
pub use supplier_repo::DieselUnitOfWork;
