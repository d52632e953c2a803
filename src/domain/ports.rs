use super::errors::DomainError;
use super::supplier::{NewSupplier, Supplier, SupplierId};

/// Persistence operations over supplier aggregates.
///
/// An implementation is always bound to one open unit of work, so every call
/// made through the same `&mut dyn SupplierStore` commits or rolls back together.
pub trait SupplierStore {
    /// Inserts a new supplier and returns it with its assigned id.
    fn save_new(&mut self, supplier: NewSupplier) -> Result<Supplier, DomainError>;

    /// Overwrites the name, contact, rating and lead time of an existing supplier.
    fn save(&mut self, supplier: &Supplier) -> Result<Supplier, DomainError>;

    /// Loads a supplier together with its orders. Within a unit of work the
    /// loaded aggregate stays locked against concurrent writers until commit.
    fn find_by_id(&mut self, id: SupplierId) -> Result<Option<Supplier>, DomainError>;

    /// All suppliers, ascending by id. Listings do not load orders, so every
    /// returned aggregate has an empty `orders`.
    fn find_all(&mut self) -> Result<Vec<Supplier>, DomainError>;

    /// Suppliers whose name contains `fragment`, compared case-insensitively,
    /// ascending by id. Wildcard characters in `fragment` match literally and an
    /// empty fragment matches every supplier. Orders are not loaded.
    fn find_by_name_containing_ignore_case(
        &mut self,
        fragment: &str,
    ) -> Result<Vec<Supplier>, DomainError>;

    fn delete(&mut self, supplier: &Supplier) -> Result<(), DomainError>;
}

/// Work executed inside a transaction.
pub type Work<'w> = dyn FnMut(&mut dyn SupplierStore) -> Result<(), DomainError> + 'w;

/// Opens atomic units of work over the supplier store.
pub trait UnitOfWork: Send + Sync + 'static {
    /// Runs `work` inside a single transaction. Writes are committed only if
    /// `work` returns `Ok`; on `Err` every write it made is rolled back.
    fn transaction(&self, work: &mut Work<'_>) -> Result<(), DomainError>;
}

impl dyn UnitOfWork {
    /// Typed wrapper over [`UnitOfWork::transaction`] that hands back the
    /// closure's result.
    pub fn run<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn SupplierStore) -> Result<T, DomainError>,
    {
        let mut work = Some(work);
        let mut output = None;
        self.transaction(&mut |store: &mut dyn SupplierStore| {
            let work = work
                .take()
                .ok_or_else(|| DomainError::Internal("unit of work ran twice".to_string()))?;
            output = Some(work(store)?);
            Ok(())
        })?;
        output.ok_or_else(|| DomainError::Internal("unit of work produced no result".to_string()))
    }
}
