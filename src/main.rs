use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use hostel_admin::config::{Config, DEFAULT_SECRET_KEY};
use hostel_admin::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger and environment
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("fatal: {}", err);
            std::process::exit(1);
        }
    };
    if config.secret_key == DEFAULT_SECRET_KEY {
        log::warn!("SECRET_KEY not set; sessions use the built-in development key");
    }

    log::info!("Connecting to database at {}", config.database_url);
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to create pool");

    // Run migrations
    log::info!("Running migrations...");
    db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let pool_data = web::Data::new(pool);
    let session_key = Key::derive_from(config.secret_key.as_bytes());
    let cookie_secure = !config.debug;
    let bind_addr = (config.host.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .wrap(middleware::Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(cookie_secure)
                    .build(),
            )
            .configure(handlers::routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
