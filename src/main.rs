use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use taskvault::auth::AuthMiddleware;
use taskvault::config::Config;
use taskvault::routes::{self, health};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let addr = config.server_addr();
    log::info!("Starting taskvault server at http://{}:{}", addr.0, addr.1);

    HttpServer::new(move || {
        let auth_secret = config.auth_secret.clone();
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::root)
            .service(health::health)
            .service(
                web::scope("/api/v1")
                    .wrap(AuthMiddleware::new(auth_secret))
                    .configure(routes::config),
            )
    })
    .bind(addr)?
    .run()
    .await
}
