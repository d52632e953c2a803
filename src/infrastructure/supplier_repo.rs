use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::{SupplierStore, UnitOfWork, Work};
use crate::domain::supplier::{NewSupplier, Supplier, SupplierId, SupplyOrder, SupplyOrderStatus};
use crate::schema::{suppliers, supply_orders};

use super::models::{
    NewSupplierRow, NewSupplyOrderRow, SupplierChangeset, SupplierRow, SupplyOrderRow,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Unit of work ─────────────────────────────────────────────────────────────

/// Postgres-backed unit of work: one database transaction per call.
pub struct DieselUnitOfWork {
    pool: DbPool,
}

impl DieselUnitOfWork {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Integration hook that links an order row to a supplier, used by the
    /// container and end-to-end tests. It is not part of [`SupplierStore`]:
    /// the insert runs on its own connection, outside any unit of work, and
    /// nothing in the service calls it.
    pub fn attach_order(
        &self,
        supplier_id: SupplierId,
        status: SupplyOrderStatus,
    ) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        let id = diesel::insert_into(supply_orders::table)
            .values(&NewSupplyOrderRow {
                supplier_id,
                status: status.as_str(),
            })
            .returning(supply_orders::id)
            .get_result(&mut conn)?;
        Ok(id)
    }
}

impl UnitOfWork for DieselUnitOfWork {
    fn transaction(&self, work: &mut Work<'_>) -> Result<(), DomainError> {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut store = DieselSupplierStore { conn };
            work(&mut store)
        })
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

pub struct DieselSupplierStore<'c> {
    conn: &'c mut PgConnection,
}

impl SupplierStore for DieselSupplierStore<'_> {
    fn save_new(&mut self, supplier: NewSupplier) -> Result<Supplier, DomainError> {
        let row = diesel::insert_into(suppliers::table)
            .values(&NewSupplierRow {
                name: &supplier.name,
                contact: &supplier.contact,
                rating: supplier.rating,
                lead_time: supplier.lead_time,
            })
            .returning(SupplierRow::as_returning())
            .get_result(self.conn)?;

        Ok(Supplier::from(row))
    }

    fn save(&mut self, supplier: &Supplier) -> Result<Supplier, DomainError> {
        let row = diesel::update(suppliers::table.find(supplier.id))
            .set(&SupplierChangeset {
                name: &supplier.name,
                contact: &supplier.contact,
                rating: supplier.rating,
                lead_time: supplier.lead_time,
            })
            .returning(SupplierRow::as_returning())
            .get_result(self.conn)
            .optional()?
            .ok_or(DomainError::SupplierNotFound(supplier.id))?;

        Ok(Supplier {
            orders: supplier.orders.clone(),
            ..Supplier::from(row)
        })
    }

    fn find_by_id(&mut self, id: SupplierId) -> Result<Option<Supplier>, DomainError> {
        // Row locks are held until the surrounding transaction ends, so a
        // concurrent delete or order-status change waits for this one.
        let row = suppliers::table
            .find(id)
            .select(SupplierRow::as_select())
            .for_update()
            .get_result(self.conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let orders = SupplyOrderRow::belonging_to(&row)
            .select(SupplyOrderRow::as_select())
            .order(supply_orders::id.asc())
            .for_share()
            .load(self.conn)?;

        to_supplier(row, orders).map(Some)
    }

    fn find_all(&mut self) -> Result<Vec<Supplier>, DomainError> {
        let rows = suppliers::table
            .select(SupplierRow::as_select())
            .order(suppliers::id.asc())
            .load(self.conn)?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    fn find_by_name_containing_ignore_case(
        &mut self,
        fragment: &str,
    ) -> Result<Vec<Supplier>, DomainError> {
        let rows = suppliers::table
            .filter(suppliers::name.ilike(like_pattern(fragment)))
            .select(SupplierRow::as_select())
            .order(suppliers::id.asc())
            .load(self.conn)?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    fn delete(&mut self, supplier: &Supplier) -> Result<(), DomainError> {
        let deleted = diesel::delete(suppliers::table.find(supplier.id)).execute(self.conn)?;
        if deleted == 0 {
            return Err(DomainError::SupplierNotFound(supplier.id));
        }
        Ok(())
    }
}

// Listings carry no orders; only `find_by_id` loads and parses them.
impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            contact: row.contact,
            rating: row.rating,
            lead_time: row.lead_time,
            orders: vec![],
        }
    }
}

fn to_supplier(row: SupplierRow, orders: Vec<SupplyOrderRow>) -> Result<Supplier, DomainError> {
    let orders = orders
        .into_iter()
        .map(|o| {
            let status = o.status.parse::<SupplyOrderStatus>().map_err(|_| {
                DomainError::Internal(format!("order {} has unknown status '{}'", o.id, o.status))
            })?;
            Ok(SupplyOrder { id: o.id, status })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(Supplier {
        orders,
        ..Supplier::from(row)
    })
}

/// `%fragment%` with `%`, `_` and `\` escaped so they match literally.
fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
