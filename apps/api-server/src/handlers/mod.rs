//! HTTP handlers and route configuration.

mod account;
mod auth;
mod health;
mod media;
mod posts;

use actix_web::{HttpResponse, http::header, web};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::home))
        .route("/health", web::get().to(health::health_check))
        .route("/media/{filename:.*}", web::get().to(media::media_file))
        .route("/user/{id}", web::get().to(posts::user_profile))
        .route("/post/{id}", web::get().to(posts::post_detail))
        .route("/auth", web::get().to(auth::auth_page))
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout))
        .route("/update-security", web::post().to(account::update_security))
        .route("/upload-avatar", web::post().to(account::upload_avatar))
        .service(
            web::resource("/personal_account")
                .route(web::get().to(account::personal_account))
                .route(web::post().to(account::update_profile)),
        )
        .service(
            web::resource("/create_post")
                .route(web::get().to(posts::create_post_form))
                .route(web::post().to(posts::create_post)),
        );
}

/// 302 redirect to `location`.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
