//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod health;
mod posts;


use actix_web::web;

/// Configure all application routes.
///
/// Fixed paths are registered before the `/{id}/` post-detail resource so
/// they match first.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(posts::list))
            .route(web::post().to(posts::create)),
    )
    .service(
        web::resource("/category/")
            .route(web::get().to(categories::list))
            .route(web::post().to(categories::create)),
    )
    .service(web::resource("/categories/").route(web::get().to(categories::dropdown)))
    .service(web::resource("/register/").route(web::post().to(auth::register)))
    .service(
        web::scope("/auth")
            .route("/login/", web::post().to(auth::login))
            .route("/refresh/", web::post().to(auth::refresh))
            .route("/logout/", web::post().to(auth::logout)),
    )
    .service(web::resource("/health/").route(web::get().to(health::health_check)))
    .service(
        web::resource("/{id}/")
            .route(web::get().to(posts::get))
            .route(web::put().to(posts::update))
            .route(web::patch().to(posts::update))
            .route(web::delete().to(posts::delete)),
    );
}
