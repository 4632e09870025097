use actix_cors::Cors;
use actix_web::{
    self, http::header, middleware::{from_fn, Logger}, web, App, HttpServer,
};
use std::sync::{Arc, LazyLock};

use crate::{
    api::error,
    configs::{connect_database, CacheStore, RedisCache},
    middlewares::{authentication, authorization},
    modules::{
        account::{repository_pg::AccountRepositoryPg, service::AccountService},
        friendship::{repository_pg::FriendshipRepositoryPg, service::RelationshipManager},
        profile::service::ProfileService,
    },
    utils::SessionRole,
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check(db_pool: web::Data<sqlx::PgPool>) -> Result<&'static str, error::Error> {
    sqlx::query("SELECT 1")
        .execute(db_pool.get_ref())
        .await
        .map_err(error::SystemError::from)?;
    Ok("Server is running")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    let redis_pool =
        RedisCache::new().await.map_err(|_| std::io::Error::other("Redis connection error"))?;

    let account_repo = Arc::new(AccountRepositoryPg::new(db_pool.clone()));
    let friendship_repo = Arc::new(FriendshipRepositoryPg::new(db_pool.clone()));

    let account_cache: Arc<dyn CacheStore + Send + Sync> = Arc::new(redis_pool);
    let account_service = AccountService::with_dependencies(
        account_repo.clone(),
        Some(account_cache),
        ENV.account_cache_ttl,
    );
    let relationship_manager = RelationshipManager::with_dependencies(friendship_repo, account_repo);
    let profile_service =
        ProfileService::with_dependencies(account_service, relationship_manager.clone());

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(relationship_manager.clone()))
            .app_data(web::Data::new(profile_service.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .service(health_check)
            .service(
                web::scope("/api")
                    .wrap(from_fn(authorization(vec![SessionRole::Authenticated])))
                    .wrap(from_fn(authentication))
                    .configure(modules::friendship::route::configure)
                    .configure(modules::profile::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
