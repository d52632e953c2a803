pub mod dto;
pub mod supplier_mapper;
pub mod supplier_service;

pub use supplier_service::SupplierService;
