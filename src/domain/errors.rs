use thiserror::Error;

use super::supplier::SupplierId;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Supplier not found with id {0}")]
    SupplierNotFound(SupplierId),
    #[error("Supplier {0} cannot be deleted: it has active orders (PENDING or IN_PROGRESS)")]
    ActiveOrders(SupplierId),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
