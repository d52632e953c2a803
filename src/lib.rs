pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::dto::{CreateSupplierRequest, SupplierResponse, UpdateSupplierRequest};
use domain::ports::UnitOfWork;

pub use application::SupplierService;
pub use db::{create_pool, DbPool};
pub use infrastructure::{DieselUnitOfWork, InMemoryUnitOfWork};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::search_suppliers,
    ),
    components(schemas(CreateSupplierRequest, UpdateSupplierRequest, SupplierResponse)),
    tags((name = "suppliers", description = "Supplier management"))
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Build and return an actix-web `Server` bound to `host:port`, serving the
/// supplier API over the given store.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    uow: Arc<dyn UnitOfWork>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(SupplierService::new(uow));
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(handlers::suppliers::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
