//! API handlers for Bookshelf REST endpoints

pub mod access_log;
pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

use crate::{error::AppError, AppState};

/// JSON body extractor
///
/// The body is decoded as JSON whatever the `Content-Type` header says;
/// decoding failures render as `{"error": ...}` with 400.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(ApiJson)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // Unmatched paths go through the access logger too, with an empty endpoint
    let books = Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/book/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log::access_log,
        ));

    Router::new()
        .merge(books)
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
