use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::UnitOfWork;
use crate::domain::supplier::{NewSupplier, SupplierId};

use super::dto::{CreateSupplierRequest, SupplierResponse, UpdateSupplierRequest};
use super::supplier_mapper::apply_update;

/// Supplier lifecycle operations. Each call runs in its own unit of work, so
/// the load, rule check and write of a mutation are observed atomically.
#[derive(Clone)]
pub struct SupplierService {
    uow: Arc<dyn UnitOfWork>,
}

impl SupplierService {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    pub fn create_supplier(
        &self,
        request: CreateSupplierRequest,
    ) -> Result<SupplierResponse, DomainError> {
        let supplier = self
            .uow
            .run(|store| store.save_new(NewSupplier::from(request)))?;

        log::info!("Created supplier {} ({})", supplier.id, supplier.name);
        Ok(SupplierResponse::from(&supplier))
    }

    pub fn update_supplier(
        &self,
        id: SupplierId,
        request: UpdateSupplierRequest,
    ) -> Result<SupplierResponse, DomainError> {
        let supplier = self.uow.run(|store| {
            let mut supplier = store
                .find_by_id(id)?
                .ok_or(DomainError::SupplierNotFound(id))?;
            apply_update(&mut supplier, request);
            store.save(&supplier)
        })?;

        log::info!("Updated supplier {}", supplier.id);
        Ok(SupplierResponse::from(&supplier))
    }

    pub fn delete_supplier(&self, id: SupplierId) -> Result<(), DomainError> {
        let result = self.uow.run(|store| {
            let supplier = store
                .find_by_id(id)?
                .ok_or(DomainError::SupplierNotFound(id))?;
            if supplier.has_active_orders() {
                return Err(DomainError::ActiveOrders(id));
            }
            store.delete(&supplier)
        });

        match &result {
            Ok(()) => log::info!("Deleted supplier {}", id),
            Err(DomainError::ActiveOrders(_)) => {
                log::warn!("Refused to delete supplier {}: active orders", id)
            }
            Err(_) => {}
        }
        result
    }

    pub fn get_all_suppliers(&self) -> Result<Vec<SupplierResponse>, DomainError> {
        let suppliers = self.uow.run(|store| store.find_all())?;
        Ok(suppliers.iter().map(SupplierResponse::from).collect())
    }

    /// Case-insensitive substring search on the supplier name. An empty
    /// fragment matches every supplier.
    pub fn search_suppliers_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<SupplierResponse>, DomainError> {
        let suppliers = self
            .uow
            .run(|store| store.find_by_name_containing_ignore_case(fragment))?;
        Ok(suppliers.iter().map(SupplierResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::domain::supplier::{Supplier, SupplyOrderStatus};
    use crate::infrastructure::InMemoryUnitOfWork;

    fn service() -> (Arc<InMemoryUnitOfWork>, SupplierService) {
        let memory = Arc::new(InMemoryUnitOfWork::new());
        let service = SupplierService::new(memory.clone());
        (memory, service)
    }

    fn load(memory: &Arc<InMemoryUnitOfWork>, id: SupplierId) -> Supplier {
        let uow: Arc<dyn UnitOfWork> = memory.clone();
        uow.run(|store| store.find_by_id(id))
            .unwrap()
            .expect("supplier exists")
    }

    fn create_request(name: &str) -> CreateSupplierRequest {
        CreateSupplierRequest {
            name: name.to_string(),
            contact: "a@x.com".to_string(),
            rating: 4.0,
            lead_time: 7,
        }
    }

    fn update_request() -> UpdateSupplierRequest {
        UpdateSupplierRequest {
            name: "Globex".to_string(),
            contact: String::new(),
            rating: 2.5,
            lead_time: 14,
        }
    }

    #[test]
    fn create_assigns_fresh_ids_and_echoes_fields() {
        let (_, service) = service();

        let first = service.create_supplier(create_request("ACME")).unwrap();
        let second = service.create_supplier(create_request("Globex")).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.name, "ACME");
        assert_eq!(first.contact, "a@x.com");
        assert_eq!(first.rating, 4.0);
        assert_eq!(first.lead_time, 7);
    }

    #[test]
    fn update_replaces_all_mutable_fields() {
        let (_, service) = service();
        let created = service.create_supplier(create_request("ACME")).unwrap();

        let updated = service.update_supplier(created.id, update_request()).unwrap();

        assert_eq!(
            updated,
            SupplierResponse {
                id: created.id,
                name: "Globex".to_string(),
                contact: String::new(),
                rating: 2.5,
                lead_time: 14,
            }
        );
        assert_eq!(service.get_all_suppliers().unwrap(), vec![updated]);
    }

    #[test]
    fn update_of_unknown_id_is_not_found_and_changes_nothing() {
        let (_, service) = service();
        let created = service.create_supplier(create_request("ACME")).unwrap();

        let err = service.update_supplier(999, update_request()).unwrap_err();

        assert!(matches!(err, DomainError::SupplierNotFound(999)));
        assert_eq!(service.get_all_suppliers().unwrap(), vec![created]);
    }

    #[test]
    fn delete_without_orders_removes_the_supplier() {
        let (_, service) = service();
        let created = service.create_supplier(create_request("ACME")).unwrap();

        service.delete_supplier(created.id).unwrap();

        assert!(service.get_all_suppliers().unwrap().is_empty());
        let err = service.delete_supplier(created.id).unwrap_err();
        assert!(matches!(err, DomainError::SupplierNotFound(_)));
    }

    #[test]
    fn delete_with_only_closed_orders_succeeds() {
        let (memory, service) = service();
        let created = service.create_supplier(create_request("ACME")).unwrap();
        memory
            .attach_order(created.id, SupplyOrderStatus::Completed)
            .unwrap();
        memory
            .attach_order(created.id, SupplyOrderStatus::Cancelled)
            .unwrap();

        service.delete_supplier(created.id).unwrap();

        assert!(service.get_all_suppliers().unwrap().is_empty());
    }

    #[test]
    fn delete_with_an_active_order_is_refused() {
        for status in [SupplyOrderStatus::Pending, SupplyOrderStatus::InProgress] {
            let (memory, service) = service();
            let created = service.create_supplier(create_request("ACME")).unwrap();
            memory
                .attach_order(created.id, SupplyOrderStatus::Completed)
                .unwrap();
            memory.attach_order(created.id, status).unwrap();
            let before = load(&memory, created.id);

            let err = service.delete_supplier(created.id).unwrap_err();

            assert!(matches!(err, DomainError::ActiveOrders(id) if id == created.id));
            assert_eq!(service.get_all_suppliers().unwrap(), vec![created]);
            let after = load(&memory, before.id);
            assert_eq!(after.orders, before.orders);
            assert_eq!(
                after.orders.iter().map(|o| o.status).collect::<Vec<_>>(),
                vec![SupplyOrderStatus::Completed, status]
            );
        }
    }

    #[test]
    fn delete_succeeds_once_active_order_is_cancelled() {
        let (memory, service) = service();
        let created = service.create_supplier(create_request("ACME")).unwrap();
        let order = memory
            .attach_order(created.id, SupplyOrderStatus::InProgress)
            .unwrap();

        assert!(service.delete_supplier(created.id).is_err());
        memory
            .set_order_status(order, SupplyOrderStatus::Cancelled)
            .unwrap();
        assert!(service.delete_supplier(created.id).is_ok());
    }

    #[test]
    fn concurrent_deletes_succeed_exactly_once() {
        let (_, service) = service();
        let created = service.create_supplier(create_request("ACME")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                thread::spawn(move || service.delete_supplier(created.id))
            })
            .collect();
        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, DomainError::SupplierNotFound(_))));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (_, service) = service();
        service.create_supplier(create_request("ACME Corp")).unwrap();
        service.create_supplier(create_request("Globex")).unwrap();
        service.create_supplier(create_request("Acme Logistics")).unwrap();

        let names: Vec<_> = service
            .search_suppliers_by_name("acme")
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["ACME Corp", "Acme Logistics"]);
    }

    #[test]
    fn empty_search_fragment_matches_all() {
        let (_, service) = service();
        service.create_supplier(create_request("ACME")).unwrap();
        service.create_supplier(create_request("Globex")).unwrap();

        assert_eq!(service.search_suppliers_by_name("").unwrap().len(), 2);
    }

    #[test]
    fn get_all_lists_in_id_order() {
        let (_, service) = service();
        let a = service.create_supplier(create_request("B")).unwrap();
        let b = service.create_supplier(create_request("A")).unwrap();

        assert_eq!(service.get_all_suppliers().unwrap(), vec![a, b]);
    }
}
