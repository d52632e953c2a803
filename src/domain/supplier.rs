use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

pub type SupplierId = i64;

/// Lifecycle state of a supply order placed with a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyOrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl SupplyOrderStatus {
    /// Active orders block deletion of their supplier.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for SupplyOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupplyOrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(DomainError::InvalidInput(format!(
                "unknown supply order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplyOrder {
    pub id: i64,
    pub status: SupplyOrderStatus,
}

/// A supplier that has not been persisted yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplier {
    pub name: String,
    pub contact: String,
    pub rating: f64,
    pub lead_time: i32,
}

/// The supplier aggregate: the supplier record plus the orders placed with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact: String,
    pub rating: f64,
    pub lead_time: i32,
    pub orders: Vec<SupplyOrder>,
}

impl Supplier {
    pub fn has_active_orders(&self) -> bool {
        self.orders.iter().any(|order| order.status.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier_with(statuses: &[SupplyOrderStatus]) -> Supplier {
        Supplier {
            id: 1,
            name: "ACME".to_string(),
            contact: "a@x.com".to_string(),
            rating: 4.0,
            lead_time: 7,
            orders: statuses
                .iter()
                .enumerate()
                .map(|(i, status)| SupplyOrder {
                    id: i as i64 + 1,
                    status: *status,
                })
                .collect(),
        }
    }

    #[test]
    fn pending_and_in_progress_are_active() {
        assert!(SupplyOrderStatus::Pending.is_active());
        assert!(SupplyOrderStatus::InProgress.is_active());
        assert!(!SupplyOrderStatus::Completed.is_active());
        assert!(!SupplyOrderStatus::Cancelled.is_active());
    }

    #[test]
    fn supplier_without_orders_has_no_active_orders() {
        assert!(!supplier_with(&[]).has_active_orders());
    }

    #[test]
    fn closed_orders_do_not_block() {
        let supplier = supplier_with(&[SupplyOrderStatus::Completed, SupplyOrderStatus::Cancelled]);
        assert!(!supplier.has_active_orders());
    }

    #[test]
    fn a_single_active_order_blocks() {
        let supplier = supplier_with(&[SupplyOrderStatus::Completed, SupplyOrderStatus::InProgress]);
        assert!(supplier.has_active_orders());
    }

    #[test]
    fn status_parses_from_its_display_form() {
        for status in [
            SupplyOrderStatus::Pending,
            SupplyOrderStatus::InProgress,
            SupplyOrderStatus::Completed,
            SupplyOrderStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<SupplyOrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "EN_ATTENTE".parse::<SupplyOrderStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
