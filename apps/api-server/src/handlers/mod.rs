//! HTTP handlers and route configuration.

mod health;
mod posts;
mod upload;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post CRUD
            .route("/posts", web::get().to(posts::list))
            .route("/posts", web::post().to(posts::create))
            .route("/posts/{post_id}", web::get().to(posts::get))
            .route("/posts/{post_id}", web::put().to(posts::update))
            .route("/posts/{post_id}", web::delete().to(posts::delete))
            // Uploads
            .route("/upload-intent", web::post().to(upload::upload_intent))
            .route("/local-upload", web::post().to(upload::local_upload)),
    );
}
