//! Handlers for the `/products` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::product::Product;
use catalog_db::UpdateOutcome;
use validator::Validate;

use crate::dto::ProductDto;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// GET /products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProductDto>>> {
    let products = state.store.list().await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

/// GET /products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ProductDto>> {
    let product = state.store.get(id).await?.ok_or_else(|| not_found(id))?;
    tracing::debug!(product_id = id, "Fetched product");
    Ok(Json(ProductDto::from(product)))
}

/// POST /products
///
/// Responds `201 Created` with the stored product and a `Location` header
/// pointing at `GET /products/{id}`.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ProductDto>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<ProductDto>)> {
    input.validate()?;

    let product = state.store.insert(&Product::from(input)).await?;
    tracing::info!(product_id = product.id, "Product created");

    let location = format!("/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(ProductDto::from(product)),
    ))
}

/// PUT /products/{id}
///
/// Full overwrite of the stored product. If the row disappears between the
/// read and the write, existence is re-checked: a missing row is a 404, a
/// row that is still there is an unexplained conflict and fails the request.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProductDto>,
) -> AppResult<StatusCode> {
    if input.id != id {
        return Err(AppError::BadRequest(format!(
            "Path id {id} does not match body id {}",
            input.id
        )));
    }
    input.validate()?;

    let mut product = state.store.get(id).await?.ok_or_else(|| not_found(id))?;
    input.apply_to(&mut product);

    match state.store.update(&product).await? {
        UpdateOutcome::Updated => {
            tracing::info!(product_id = id, "Product updated");
            Ok(StatusCode::NO_CONTENT)
        }
        UpdateOutcome::Conflict => {
            if state.store.exists(id).await? {
                tracing::error!(product_id = id, "Unresolved concurrency conflict on update");
                Err(AppError::Core(CoreError::Internal(format!(
                    "Concurrency conflict updating product {id}"
                ))))
            } else {
                tracing::warn!(product_id = id, "Product deleted during update");
                Err(not_found(id))
            }
        }
    }
}

/// DELETE /products/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let product = state.store.get(id).await?.ok_or_else(|| not_found(id))?;

    if state.store.delete(&product).await? {
        tracing::info!(product_id = id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
