use actix_web::web;

pub mod auth;
pub mod health;
pub mod webhooks;

/// Register every endpoint. `main.rs` wraps the result in the middleware
/// stack; tests mount it bare.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .service(web::scope("/auth").configure(auth::configure_routes))
        .service(web::scope("/webhook").configure(webhooks::configure_routes));
}
