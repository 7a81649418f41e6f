use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;

use tracker::{auth::AuthSettings, config::Config, db, routes, seed};

fn startup_error<E: std::fmt::Display>(context: &str, error: E) -> io::Error {
    log::error!("{}: {}", context, error);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, error))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    let pool = db::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;
    db::migrate(&pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;

    if config.seed_sample_data {
        seed::seed(&pool, config.bcrypt_cost)
            .await
            .map_err(|e| startup_error("Failed to seed sample data", e))?;
    }

    let pool = web::Data::new(pool);
    let auth_settings = web::Data::new(AuthSettings::new(&config.jwt_secret, config.bcrypt_cost));
    let cors_origin = config.cors_origin.clone();

    log::info!("Starting tracker server at {}", config.server_url());
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(pool.clone())
            .app_data(auth_settings.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
