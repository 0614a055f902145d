use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{BytesRejection, FormRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;

use stockroom_inventory::{ItemId, ItemUpdate};

use crate::error::ApiError;
use crate::state::AppState;
use crate::view::{ItemView, MessageBody};

/// Static form page for registering items.
pub const UPLOAD_FORM_PAGE: &str = "UploadForm.html";
/// Static form page for searching items.
pub const SEARCH_FORM_PAGE: &str = "SearchForm.html";

type ApiResult<T> = Result<T, ApiError>;

fn parse_id(raw: &str) -> ApiResult<ItemId> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("item not found: {raw}")))
}

/// Turn a body or form extraction failure into a JSON error, keeping 413
/// for bodies over the upload limit.
fn rejected_body(status: StatusCode, detail: impl std::fmt::Display) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!("request body too large: {detail}"))
    } else {
        ApiError::Validation(format!("malformed request body: {detail}"))
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    rejected_body(e.status(), e.body_text())
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "items": state.inventory.len(),
    }))
}

/// `POST /register`, multipart fields `name`, `description`, `photo`.
///
/// The photo is buffered in memory and only written once the form has
/// parsed and carries a name, so a rejected registration never leaves a
/// file in the blob root.
pub async fn register(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<impl IntoResponse> {
    let mut multipart = multipart.map_err(|e| rejected_body(e.status(), e.body_text()))?;

    let mut name = None;
    let mut description = None;
    let mut photo = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await.map_err(multipart_error)?),
            Some("description") => description = Some(field.text().await.map_err(multipart_error)?),
            Some("photo") => photo = Some(field.bytes().await.map_err(multipart_error)?),
            other => tracing::debug!(field = ?other, "ignoring unknown form field"),
        }
    }

    let name = name.unwrap_or_default();
    let item = state
        .inventory
        .create(&name, description.as_deref(), photo)
        .await?;
    Ok((StatusCode::CREATED, Json(ItemView::from_item(&item))))
}

/// `GET /inventory`
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<ItemView>> {
    Json(state.inventory.list().iter().map(ItemView::from_item).collect())
}

/// `GET /inventory/:id`
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemView>> {
    let item = state.inventory.get(&parse_id(&id)?)?;
    Ok(Json(ItemView::from_item(&item)))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// `PUT /inventory/:id`, JSON body with optional `name` and `description`.
///
/// An unknown id is reported before the body is looked at.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<ItemView>> {
    let id = parse_id(&id)?;
    state.inventory.get(&id)?;
    let body = body.map_err(|e| rejected_body(e.status(), e.body_text()))?;
    let request: UpdateRequest = if body.is_empty() {
        UpdateRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Validation(format!("invalid JSON body: {e}")))?
    };
    let update = ItemUpdate {
        name: request.name,
        description: request.description,
    };
    let item = state.inventory.update(&id, update)?;
    Ok(Json(ItemView::from_item(&item)))
}

/// `DELETE /inventory/:id`
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let id = parse_id(&id)?;
    state.inventory.delete(&id).await?;
    Ok(Json(MessageBody::new(format!("item {id} deleted"))))
}

/// `GET /inventory/:id/photo`
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let blob = state
        .inventory
        .photo_ref(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("item {id} has no photo")))?;
    let data = state.inventory.blobs().read(&blob).await?;
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], data))
}

/// `PUT /inventory/:id/photo`, raw photo bytes as the body.
pub async fn put_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<MessageBody>> {
    let id = parse_id(&id)?;
    let body = body.map_err(|e| rejected_body(e.status(), e.body_text()))?;
    state.inventory.set_photo(&id, body).await?;
    Ok(Json(MessageBody::new(format!("photo for item {id} updated"))))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub id: Option<String>,
    #[serde(rename = "includePhoto")]
    pub include_photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub id: Option<String>,
    pub has_photo: Option<String>,
}

/// `GET /search?id=...&includePhoto=on`
pub async fn search_query(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<ItemView>> {
    search(&state, query.id.as_deref(), query.include_photo.as_deref())
}

/// `POST /search`, urlencoded fields `id` and `has_photo`.
pub async fn search_form(
    State(state): State<AppState>,
    form: Result<axum::Form<SearchForm>, FormRejection>,
) -> ApiResult<Json<ItemView>> {
    let axum::Form(form) = form.map_err(|e| rejected_body(e.status(), e.body_text()))?;
    search(&state, form.id.as_deref(), form.has_photo.as_deref())
}

fn search(state: &AppState, id: Option<&str>, photo_flag: Option<&str>) -> ApiResult<Json<ItemView>> {
    let raw = id.unwrap_or_default();
    let item = state.inventory.get(&parse_id(raw)?)?;
    let view = ItemView::from_item(&item);
    // Only the literal checkbox value "on" asks for the link.
    let view = if photo_flag == Some("on") {
        view.with_photo_link()
    } else {
        view
    };
    Ok(Json(view))
}

/// `GET /UploadForm.html`
pub async fn upload_form_page(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    static_page(&state, UPLOAD_FORM_PAGE).await
}

/// `GET /SearchForm.html`
pub async fn search_form_page(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    static_page(&state, SEARCH_FORM_PAGE).await
}

async fn static_page(state: &AppState, page: &str) -> ApiResult<impl IntoResponse> {
    let path = state.static_dir.join(page);
    let html = tokio::fs::read(&path).await.map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "static page unavailable");
        ApiError::NotFound(format!("{page} not found"))
    })?;
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], Bytes::from(html)))
}

/// Fallback for unknown routes and unsupported methods.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
