use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Any method a route does not list answers 405 with a JSON error.
fn endpoint(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(handler::method_not_allowed)
}

/// Build the axum router with all Stockroom endpoints.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        .route("/health", endpoint(get(handler::health)))
        .route("/register", endpoint(post(handler::register)))
        .route("/inventory", endpoint(get(handler::list_items)))
        .route(
            "/inventory/:id",
            endpoint(
                get(handler::get_item)
                    .put(handler::update_item)
                    .delete(handler::delete_item),
            ),
        )
        .route(
            "/inventory/:id/photo",
            endpoint(get(handler::get_photo).put(handler::put_photo)),
        )
        .route(
            "/search",
            endpoint(get(handler::search_query).post(handler::search_form)),
        )
        .route("/UploadForm.html", endpoint(get(handler::upload_form_page)))
        .route("/SearchForm.html", endpoint(get(handler::search_form_page)))
        .fallback(handler::method_not_allowed)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
