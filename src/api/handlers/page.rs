use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::PageRequest;
use crate::api::dtos::responses::PageResponse;
use crate::domain::models::page::{NewPageParams, Page};
use crate::error::AppError;
use sqlx::types::Json as JsonColumn;
use std::sync::Arc;
use tracing::info;

pub async fn list_pages(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.page_repo.list_all().await?))
}

pub async fn create_page(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<PageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.cleaned()?;

    let page = Page::new(NewPageParams {
        parent_id: payload.parent_id,
        slug: payload.slug,
        title: payload.title,
        kind: payload.kind,
        hotel_id: payload.hotel_id,
        address: payload.address,
        phone: payload.phone,
        email: payload.email,
        body: payload.body,
        sort_order: payload.sort_order,
    }, state.clock.now());

    state.page_tree_service.validate(&page).await?;
    let created = state.page_repo.create(&page).await?;
    let path = state.page_tree_service.path(&created.id).await?;
    info!(page_id = %created.id, path = %path, "Page created");

    Ok((StatusCode::CREATED, Json(PageResponse { page: created, path })))
}

pub async fn get_page(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(page_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let page = find_page(&state, &page_id).await?;
    let path = state.page_tree_service.path(&page.id).await?;
    Ok(Json(PageResponse { page, path }))
}

pub async fn update_page(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(page_id): Path<String>,
    Json(payload): Json<PageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.cleaned()?;

    let mut page = find_page(&state, &page_id).await?;
    page.parent_id = payload.parent_id;
    page.slug = payload.slug;
    page.title = payload.title;
    page.kind = payload.kind;
    page.hotel_id = payload.hotel_id;
    page.address = payload.address;
    page.phone = payload.phone;
    page.email = payload.email;
    page.body = JsonColumn(payload.body);
    page.sort_order = payload.sort_order;
    page.updated_at = state.clock.now();

    state.page_tree_service.validate(&page).await?;
    let updated = state.page_repo.update(&page).await?;
    let path = state.page_tree_service.path(&updated.id).await?;

    Ok(Json(PageResponse { page: updated, path }))
}

pub async fn delete_page(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(page_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.page_repo.delete(&page_id).await?;
    info!(page_id = %page_id, "Page deleted with its subtree");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_page(state: &AppState, page_id: &str) -> Result<Page, AppError> {
    state.page_repo.find_by_id(page_id).await?
        .ok_or_else(|| AppError::NotFound("Page not found".into()))
}
