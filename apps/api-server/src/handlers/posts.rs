//! Post handlers.

use actix_web::{HttpResponse, http::header, web};

use inkwell_core::domain::Post;
use inkwell_core::validation;
use inkwell_shared::PostResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn find_post(state: &AppState, id: i64) -> AppResult<Post> {
    state.posts.find_by_id(id).await?.ok_or(AppError::NotFound)
}

/// Search term from the query string; the last `term` wins when repeated.
fn search_term(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .rev()
        .find(|(key, _)| key == "term")
        .map(|(_, value)| value.as_str())
}

/// GET /posts?term=<string>
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(search_term(&query)).await?;

    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /posts
pub async fn create_post(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let fields = validation::parse_post(&body)?;

    let post = state.posts.create(fields).await?;
    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// PUT /posts/{id}
///
/// An unknown id is reported before the body is looked at.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    find_post(&state, id).await?;

    let fields = validation::parse_post(&body)?;
    let post = state.posts.update(id, fields).await?;
    tracing::info!(post_id = id, "Post updated");

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// Any other method on `/posts`.
pub async fn collection_method_not_allowed() -> HttpResponse {
    method_not_allowed("GET, POST")
}

/// Any other method on `/posts/{id}`.
pub async fn item_method_not_allowed() -> HttpResponse {
    method_not_allowed("GET, PUT, DELETE")
}

fn method_not_allowed(allow: &'static str) -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, allow))
        .finish()
}
