//! HTTP handlers and route configuration.

mod blog;
mod health;
mod pages;

use actix_web::{HttpRequest, HttpResponse, web};
use tera::{Context, Tera};

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::index))
        .route("/Demos", web::get().to(pages::demos))
        .route("/Contact", web::get().to(pages::contact))
        .route("/About", web::get().to(pages::about))
        .route("/Error", web::get().to(pages::error))
        .route("/blog", web::get().to(blog::index))
        .route("/blog/{path:.+}", web::get().to(blog::show))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/blog")
                        .route("/posts", web::get().to(blog::list_posts))
                        .route("/posts/{link}", web::get().to(blog::get_post))
                        .route("/categories", web::get().to(blog::list_categories))
                        .route(
                            "/categories/{link_name}",
                            web::get().to(blog::get_category),
                        ),
                ),
        );
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No route for {}", req.path())))
}

/// Render an HTML template into a 200 response.
fn render(templates: &Tera, name: &str, context: &Context) -> AppResult<HttpResponse> {
    let body = templates.render(name, context)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
