use axum::{
    extract::{Path, State},
    response::Html,
};
use std::sync::Arc;
use tera::Context;
use crate::api::dtos::responses::RoomResponse;
use crate::domain::models::page::{Page, PageKind};
use crate::domain::services::blocks::render_blocks;
use crate::error::AppError;
use crate::state::AppState;
use super::{render, ErrorPage, OrErrorPage};

pub async fn show_page(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Html<String>, ErrorPage> {
    page_view(&state, &path).await.or_error_page(&state)
}

async fn page_view(state: &AppState, path: &str) -> Result<Html<String>, AppError> {
    let page = state.page_tree_service.resolve(path).await?;
    let children = state.page_repo.list_children(Some(&page.id)).await?;

    let mut context = Context::new();
    context.insert("page", &page);
    context.insert("body_html", &render_blocks(&page.body));
    context.insert("children", &children);
    context.insert("path", &path.trim_matches('/'));

    match page.kind {
        PageKind::Home => {
            let hotels = state.hotel_repo.list_first(state.config.home_hotel_limit).await?;
            context.insert("hotels", &hotels);
        }
        PageKind::Contact => {}
        PageKind::Hotel => insert_hotel(state, &page, &mut context).await?,
    }

    render(&state.templates, "page.html", &context)
}

async fn insert_hotel(state: &AppState, page: &Page, context: &mut Context) -> Result<(), AppError> {
    let hotel_id = page.hotel_id.as_deref()
        .ok_or_else(|| AppError::InternalWithMsg(format!("hotel page {} has no hotel", page.id)))?;
    let hotel = state.hotel_repo.find_by_id(hotel_id).await?
        .ok_or_else(|| AppError::NotFound("Hotel not found".into()))?;

    let images = state.hotel_repo.list_images(&hotel.id).await?;
    let rooms: Vec<RoomResponse> = state.room_repo.list_by_hotel(&hotel.id).await?
        .into_iter()
        .map(RoomResponse::from)
        .collect();

    context.insert("hotel", &hotel);
    context.insert("images", &images);
    context.insert("rooms", &rooms);
    Ok(())
}
