use crate::domain::supplier::{NewSupplier, Supplier};

use super::dto::{CreateSupplierRequest, SupplierResponse, UpdateSupplierRequest};

impl From<CreateSupplierRequest> for NewSupplier {
    fn from(request: CreateSupplierRequest) -> Self {
        Self {
            name: request.name,
            contact: request.contact,
            rating: request.rating,
            lead_time: request.lead_time,
        }
    }
}

impl From<&Supplier> for SupplierResponse {
    fn from(supplier: &Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name.clone(),
            contact: supplier.contact.clone(),
            rating: supplier.rating,
            lead_time: supplier.lead_time,
        }
    }
}

/// Replaces every mutable field of `supplier` with the request's values.
/// Identity and orders are left untouched.
pub fn apply_update(supplier: &mut Supplier, request: UpdateSupplierRequest) {
    supplier.name = request.name;
    supplier.contact = request.contact;
    supplier.rating = request.rating;
    supplier.lead_time = request.lead_time;
}
