use std::sync::Arc;

use dotenvy::dotenv;
use supplier_service::config::AppConfig;
use supplier_service::{build_server, create_pool, run_migrations, DieselUnitOfWork};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config.database_url, config.pool_size);
    run_migrations(&pool);

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(
        Arc::new(DieselUnitOfWork::new(pool)),
        &config.host,
        config.port,
    )?
    .await
}
