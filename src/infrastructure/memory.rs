use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::errors::DomainError;
use crate::domain::ports::{SupplierStore, UnitOfWork, Work};
use crate::domain::supplier::{NewSupplier, Supplier, SupplierId, SupplyOrder, SupplyOrderStatus};

#[derive(Debug, Clone, Default)]
struct State {
    last_supplier_id: SupplierId,
    last_order_id: i64,
    suppliers: BTreeMap<SupplierId, Supplier>,
}

/// Process-local store. A single mutex serialises units of work, and a
/// snapshot taken at the start of each one is restored if it fails.
#[derive(Debug, Default)]
pub struct InMemoryUnitOfWork {
    state: Mutex<State>,
}

impl InMemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))
    }

    /// Test hook that links an order to a supplier and returns the order id.
    /// Not part of [`SupplierStore`]; it takes the lock outside any unit of work.
    pub fn attach_order(
        &self,
        supplier_id: SupplierId,
        status: SupplyOrderStatus,
    ) -> Result<i64, DomainError> {
        let mut state = self.lock()?;
        state.last_order_id += 1;
        let id = state.last_order_id;
        let supplier = state
            .suppliers
            .get_mut(&supplier_id)
            .ok_or(DomainError::SupplierNotFound(supplier_id))?;
        supplier.orders.push(SupplyOrder { id, status });
        Ok(id)
    }

    /// Test hook that moves an existing order to `status`, wherever it is attached.
    pub fn set_order_status(
        &self,
        order_id: i64,
        status: SupplyOrderStatus,
    ) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let order = state
            .suppliers
            .values_mut()
            .flat_map(|s| s.orders.iter_mut())
            .find(|o| o.id == order_id)
            .ok_or_else(|| DomainError::InvalidInput(format!("no order with id {order_id}")))?;
        order.status = status;
        Ok(())
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn transaction(&self, work: &mut Work<'_>) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let snapshot = state.clone();

        let result = work(&mut MemorySupplierStore { state: &mut state });
        if result.is_err() {
            *state = snapshot;
        }
        result
    }
}

struct MemorySupplierStore<'s> {
    state: &'s mut State,
}

impl SupplierStore for MemorySupplierStore<'_> {
    fn save_new(&mut self, supplier: NewSupplier) -> Result<Supplier, DomainError> {
        self.state.last_supplier_id += 1;
        let saved = Supplier {
            id: self.state.last_supplier_id,
            name: supplier.name,
            contact: supplier.contact,
            rating: supplier.rating,
            lead_time: supplier.lead_time,
            orders: vec![],
        };
        self.state.suppliers.insert(saved.id, saved.clone());
        Ok(saved)
    }

    fn save(&mut self, supplier: &Supplier) -> Result<Supplier, DomainError> {
        let stored = self
            .state
            .suppliers
            .get_mut(&supplier.id)
            .ok_or(DomainError::SupplierNotFound(supplier.id))?;
        stored.name = supplier.name.clone();
        stored.contact = supplier.contact.clone();
        stored.rating = supplier.rating;
        stored.lead_time = supplier.lead_time;
        Ok(stored.clone())
    }

    fn find_by_id(&mut self, id: SupplierId) -> Result<Option<Supplier>, DomainError> {
        Ok(self.state.suppliers.get(&id).cloned())
    }

    fn find_all(&mut self) -> Result<Vec<Supplier>, DomainError> {
        Ok(self.state.suppliers.values().map(without_orders).collect())
    }

    fn find_by_name_containing_ignore_case(
        &mut self,
        fragment: &str,
    ) -> Result<Vec<Supplier>, DomainError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .state
            .suppliers
            .values()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .map(without_orders)
            .collect())
    }

    fn delete(&mut self, supplier: &Supplier) -> Result<(), DomainError> {
        self.state
            .suppliers
            .remove(&supplier.id)
            .map(|_| ())
            .ok_or(DomainError::SupplierNotFound(supplier.id))
    }
}

fn without_orders(supplier: &Supplier) -> Supplier {
    Supplier {
        orders: vec![],
        ..supplier.clone()
    }
}
