//! Blog handlers

use crate::error::ApiError;
use crate::extractors::ValidJson;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use financeai_core::{BlogPost, BlogPostPatch, NewBlogPost};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    featured: Option<String>,
    category: Option<String>,
    search: Option<String>,
}

/// `featured=true` wins over `category`, which wins over `search`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let category = query.category.filter(|c| !c.is_empty());
    let search = query.search.filter(|s| !s.is_empty());

    let posts = if query.featured.as_deref() == Some("true") {
        state.store.get_featured_blog_posts().await
    } else if let Some(category) = category {
        state.store.get_blog_posts_by_category(&category).await
    } else if let Some(search) = search {
        state.store.search_blog_posts(&search).await
    } else {
        state.store.get_all_blog_posts().await
    };

    posts
        .map(Json)
        .map_err(|e| ApiError::internal(e, "Failed to fetch blog posts"))
}

pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    match state.store.get_blog_post_by_slug(&slug).await {
        Ok(Some(post)) => Ok(Json(post)),
        Ok(None) => Err(ApiError::not_found("Blog post not found")),
        Err(e) => Err(ApiError::internal(e, "Failed to fetch blog post")),
    }
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(post): ValidJson<NewBlogPost>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let post = state
        .store
        .create_blog_post(post)
        .await
        .map_err(|e| ApiError::from_error(e, "Invalid blog post data"))?;

    info!("Blog post created: id={}, slug={}", post.id, post.slug);
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<BlogPostPatch>,
) -> Result<Json<BlogPost>, ApiError> {
    match state.store.update_blog_post(&id, patch).await {
        Ok(Some(post)) => {
            info!("Blog post updated: id={}", post.id);
            Ok(Json(post))
        }
        Ok(None) => Err(ApiError::not_found("Blog post not found")),
        Err(e) => Err(ApiError::from_error(e, "Failed to update blog post")),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete_blog_post(&id).await {
        Ok(true) => {
            info!("Blog post deleted: id={}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(ApiError::not_found("Blog post not found")),
        Err(e) => Err(ApiError::internal(e, "Failed to delete blog post")),
    }
}
