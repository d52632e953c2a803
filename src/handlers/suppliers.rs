use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::application::dto::{
    CreateSupplierRequest, SearchSuppliersParams, SupplierResponse, UpdateSupplierRequest,
};
use crate::application::SupplierService;
use crate::auth::{
    Authorized, CreateSupplier, DeleteSupplier, ListSuppliers, SearchSuppliers, UpdateSupplier,
};
use crate::errors::AppError;

// ── Handlers ─────────────────────────────────────────────────────────────────
//
// `Authorized<_>` is always the first argument: extractors are polled in
// order and it resolves immediately, so an unauthorized request is rejected
// before its body is read.

/// POST /suppliers
#[utoipa::path(
    post,
    path = "/suppliers",
    params(("X-User-Role" = String, Header, description = "Must be PROCUREMENT_MANAGER")),
    request_body = CreateSupplierRequest,
    responses(
        (status = 201, description = "Supplier created", body = SupplierResponse),
        (status = 400, description = "Malformed or invalid body"),
        (status = 401, description = "Missing or unknown role"),
        (status = 403, description = "Role not allowed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "suppliers"
)]
pub async fn create_supplier(
    _auth: Authorized<CreateSupplier>,
    service: web::Data<SupplierService>,
    body: web::Json<CreateSupplierRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let created = web::block(move || service.create_supplier(body)).await??;

    Ok(HttpResponse::Created().json(created))
}

/// PUT /suppliers/{id}
///
/// Replaces name, contact, rating and lead time wholesale.
#[utoipa::path(
    put,
    path = "/suppliers/{id}",
    params(
        ("id" = i64, Path, description = "Supplier id"),
        ("X-User-Role" = String, Header, description = "Must be PROCUREMENT_MANAGER"),
    ),
    request_body = UpdateSupplierRequest,
    responses(
        (status = 200, description = "Supplier updated", body = SupplierResponse),
        (status = 400, description = "Malformed or invalid body"),
        (status = 401, description = "Missing or unknown role"),
        (status = 403, description = "Role not allowed"),
        (status = 404, description = "Supplier not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "suppliers"
)]
pub async fn update_supplier(
    _auth: Authorized<UpdateSupplier>,
    service: web::Data<SupplierService>,
    path: web::Path<i64>,
    body: web::Json<UpdateSupplierRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    body.validate()?;

    let updated = web::block(move || service.update_supplier(id, body)).await??;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /suppliers/{id}
///
/// Refused with 409 while the supplier has PENDING or IN_PROGRESS orders.
#[utoipa::path(
    delete,
    path = "/suppliers/{id}",
    params(
        ("id" = i64, Path, description = "Supplier id"),
        ("X-User-Role" = String, Header, description = "Must be PROCUREMENT_MANAGER"),
    ),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 401, description = "Missing or unknown role"),
        (status = 403, description = "Role not allowed"),
        (status = 404, description = "Supplier not found"),
        (status = 409, description = "Supplier has active orders"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "suppliers"
)]
pub async fn delete_supplier(
    _auth: Authorized<DeleteSupplier>,
    service: web::Data<SupplierService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || service.delete_supplier(id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /suppliers
#[utoipa::path(
    get,
    path = "/suppliers",
    params(("X-User-Role" = String, Header, description = "Must be LOGISTICS_SUPERVISOR")),
    responses(
        (status = 200, description = "All suppliers", body = [SupplierResponse]),
        (status = 401, description = "Missing or unknown role"),
        (status = 403, description = "Role not allowed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "suppliers"
)]
pub async fn list_suppliers(
    _auth: Authorized<ListSuppliers>,
    service: web::Data<SupplierService>,
) -> Result<HttpResponse, AppError> {
    let suppliers = web::block(move || service.get_all_suppliers()).await??;

    Ok(HttpResponse::Ok().json(suppliers))
}

/// GET /suppliers/search?name=
#[utoipa::path(
    get,
    path = "/suppliers/search",
    params(
        SearchSuppliersParams,
        ("X-User-Role" = String, Header, description = "Must be PURCHASING_OFFICER"),
    ),
    responses(
        (status = 200, description = "Suppliers whose name contains the fragment", body = [SupplierResponse]),
        (status = 400, description = "Missing name parameter"),
        (status = 401, description = "Missing or unknown role"),
        (status = 403, description = "Role not allowed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "suppliers"
)]
pub async fn search_suppliers(
    _auth: Authorized<SearchSuppliers>,
    service: web::Data<SupplierService>,
    query: web::Query<SearchSuppliersParams>,
) -> Result<HttpResponse, AppError> {
    let SearchSuppliersParams { name } = query.into_inner();

    let suppliers = web::block(move || service.search_suppliers_by_name(&name)).await??;

    Ok(HttpResponse::Ok().json(suppliers))
}

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// ── Routing ──────────────────────────────────────────────────────────────────

/// Supplier routes mounted at `path`.
pub fn scope(path: &str) -> actix_web::Scope {
    web::scope(path)
        .route("", web::post().to(create_supplier))
        .route("", web::get().to(list_suppliers))
        .route("/search", web::get().to(search_suppliers))
        .route("/{id}", web::put().to(update_supplier))
        .route("/{id}", web::delete().to(delete_supplier))
}

/// Routes plus extractor settings that turn malformed input into 400s with
/// the same JSON error body as every other failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .route("/health", web::get().to(health))
    .service(scope("/suppliers"))
    .service(scope("/api/suppliers"));
}
