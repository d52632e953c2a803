//! Role-based access control for the supplier endpoints.
//!
//! Callers are authenticated upstream; the gateway forwards the caller's role
//! in the `X-User-Role` header. Each handler takes an [`Authorized`] extractor
//! as its first argument, which consults [`required_role`] before any other
//! extractor (including the JSON body) is polled.

use std::fmt;
use std::future::{ready, Ready};
use std::marker::PhantomData;
use std::str::FromStr;

use actix_web::dev::Payload;
use actix_web::http::header::HeaderValue;
use actix_web::{FromRequest, HttpRequest};

use crate::errors::AppError;

pub const ROLE_HEADER: &str = "X-User-Role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    ProcurementManager,
    LogisticsSupervisor,
    PurchasingOfficer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::ProcurementManager => "PROCUREMENT_MANAGER",
            Role::LogisticsSupervisor => "LOGISTICS_SUPERVISOR",
            Role::PurchasingOfficer => "PURCHASING_OFFICER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PROCUREMENT_MANAGER" => Ok(Role::ProcurementManager),
            "LOGISTICS_SUPERVISOR" => Ok(Role::LogisticsSupervisor),
            "PURCHASING_OFFICER" => Ok(Role::PurchasingOfficer),
            other => Err(AppError::Unauthorized(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierOperation {
    Create,
    Update,
    Delete,
    List,
    Search,
}

/// The access policy: which role may perform which operation.
pub fn required_role(operation: SupplierOperation) -> Role {
    match operation {
        SupplierOperation::Create | SupplierOperation::Update | SupplierOperation::Delete => {
            Role::ProcurementManager
        }
        SupplierOperation::List => Role::LogisticsSupervisor,
        SupplierOperation::Search => Role::PurchasingOfficer,
    }
}

/// Resolves the caller's role from the header value and checks it against the
/// policy. A missing or unrecognised role is a 401, a mismatch is a 403.
pub fn authorize(
    header: Option<&HeaderValue>,
    operation: SupplierOperation,
) -> Result<Role, AppError> {
    let raw = header
        .ok_or_else(|| AppError::Unauthorized(format!("missing {ROLE_HEADER} header")))?
        .to_str()
        .map_err(|_| AppError::Unauthorized(format!("malformed {ROLE_HEADER} header")))?;
    let role: Role = raw.parse()?;

    let required = required_role(operation);
    if role != required {
        log::debug!("Role {} denied {:?}; requires {}", role, operation, required);
        return Err(AppError::Forbidden(format!(
            "{operation:?} requires role {required}"
        )));
    }
    Ok(role)
}

/// Binds a marker type to the operation it guards.
pub trait Guarded {
    const OPERATION: SupplierOperation;
}

macro_rules! guarded_operations {
    ($($marker:ident => $operation:ident),* $(,)?) => {
        $(
            pub struct $marker;

            impl Guarded for $marker {
                const OPERATION: SupplierOperation = SupplierOperation::$operation;
            }
        )*
    };
}

guarded_operations! {
    CreateSupplier => Create,
    UpdateSupplier => Update,
    DeleteSupplier => Delete,
    ListSuppliers => List,
    SearchSuppliers => Search,
}

/// Proof that the caller holds the role required for `P`.
pub struct Authorized<P> {
    pub role: Role,
    _operation: PhantomData<P>,
}

impl<P: Guarded> FromRequest for Authorized<P> {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            authorize(req.headers().get(ROLE_HEADER), P::OPERATION).map(|role| Authorized {
                role,
                _operation: PhantomData,
            }),
        )
    }
}
