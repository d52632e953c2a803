use diesel::prelude::*;

use crate::schema::{suppliers, supply_orders};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = suppliers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SupplierRow {
    pub id: i64,
    pub name: String,
    pub contact: String,
    pub rating: f64,
    pub lead_time: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = suppliers)]
pub struct NewSupplierRow<'a> {
    pub name: &'a str,
    pub contact: &'a str,
    pub rating: f64,
    pub lead_time: i32,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = suppliers)]
pub struct SupplierChangeset<'a> {
    pub name: &'a str,
    pub contact: &'a str,
    pub rating: f64,
    pub lead_time: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = supply_orders)]
#[diesel(belongs_to(SupplierRow, foreign_key = supplier_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SupplyOrderRow {
    pub id: i64,
    pub supplier_id: Option<i64>,
    pub status: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = supply_orders)]
pub struct NewSupplyOrderRow<'a> {
    pub supplier_id: i64,
    pub status: &'a str,
}
