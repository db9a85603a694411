//! Blog pages and the blog JSON API.
//!
//! Only published posts are visible; a scheduled post is reported as missing.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use folio_core::domain::{LinkName, Post};
use folio_shared::{ApiResponse, CategoryResponse, PostResponse, PostSummary};
use tera::Context;

use super::render;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Look up a post by link, hiding it until its publish time.
async fn published_post(state: &AppState, link: &str) -> AppResult<Post> {
    let link = LinkName::from_name(link);
    let now = Utc::now();

    state
        .posts
        .find_by_link(link.as_str())
        .await?
        .filter(|post| post.is_published(now))
        .ok_or_else(|| AppError::NotFound(format!("Post '{}' not found", link)))
}

async fn published_summaries(state: &AppState) -> AppResult<Vec<PostSummary>> {
    let posts = state.posts.find_published(Utc::now()).await?;
    Ok(posts.iter().map(PostSummary::from).collect())
}

/// GET /blog
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let mut context = Context::new();
    context.insert("posts", &published_summaries(&state).await?);

    render(&state.templates, "blog.html.tera", &context)
}

/// GET /blog/{category path}/{link}
///
/// The whole path must match the post's permalink.
pub async fn show(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let path = path.into_inner();
    let link = path.rsplit('/').next().unwrap_or_default();

    let post = published_post(&state, link).await?;
    if post.permalink() != format!("/blog/{}", path.trim_end_matches('/')) {
        return Err(AppError::NotFound(format!("No post at /blog/{}", path)));
    }

    let mut context = Context::new();
    context.insert("post", &PostResponse::from(&post));

    render(&state.templates, "post.html.tera", &context)
}

/// GET /api/blog/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = published_summaries(&state).await?;
    tracing::debug!(count = posts.len(), "Listing published posts");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/blog/posts/{link}
pub async fn get_post(
    state: web::Data<AppState>,
    link: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, &link).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(&post))))
}

/// GET /api/blog/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;
    let body: Vec<CategoryResponse> = categories.iter().map(CategoryResponse::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/blog/categories/{link_name}
pub async fn get_category(
    state: web::Data<AppState>,
    link_name: web::Path<String>,
) -> AppResult<HttpResponse> {
    let link_name = LinkName::from_name(&link_name);

    let category = state
        .categories
        .find_by_link_name(link_name.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", link_name)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoryResponse::from(&category))))
}
