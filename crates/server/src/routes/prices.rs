use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::MessageBody;
use service::prices::{Collection, CreateItemInput, Item, PriceStore, UpdatePriceInput};
use tracing::debug;

use crate::errors::ApiError;

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>().map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// A body that is not a JSON object counts as one with no fields.
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(v)) => v,
        Err(rejection) => {
            debug!(%rejection, "unusable request body, treating as empty");
            T::default()
        }
    }
}

#[utoipa::path(
    get, path = "/prices/{collection}", tag = "prices",
    params(("collection" = String, Path, description = "`food` or `drinks`")),
    responses(
        (status = 200, description = "Items in insertion order", body = [crate::openapi::ItemDoc]),
        (status = 404, description = "Collection not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(
    State(store): State<Arc<PriceStore>>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let c: Collection = collection.parse()?;
    Ok(Json(store.list(c).await))
}

#[utoipa::path(
    post, path = "/prices/{collection}", tag = "prices",
    params(("collection" = String, Path, description = "`food` or `drinks`")),
    request_body = crate::openapi::CreateItemDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemDoc),
        (status = 400, description = "Invalid input", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Collection not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(store): State<Arc<PriceStore>>,
    Path(collection): Path<String>,
    body: Result<Json<CreateItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let c: Collection = collection.parse()?;
    let item = store.create(c, body_or_default(body)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    patch, path = "/prices/{collection}/{id}", tag = "prices",
    params(
        ("collection" = String, Path, description = "`food` or `drinks`"),
        ("id" = u64, Path, description = "Item id")
    ),
    request_body = crate::openapi::UpdatePriceDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemDoc),
        (status = 400, description = "Invalid price or id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Item not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update_price(
    State(store): State<Arc<PriceStore>>,
    Path((collection, id)): Path<(String, String)>,
    body: Result<Json<UpdatePriceInput>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let c: Collection = collection.parse()?;
    let id = parse_id(&id)?;
    let item = store.update_price(c, id, body_or_default(body)).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete, path = "/prices/{collection}/{id}", tag = "prices",
    params(
        ("collection" = String, Path, description = "`food` or `drinks`"),
        ("id" = u64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageBodyDoc),
        (status = 400, description = "Invalid id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Item not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(store): State<Arc<PriceStore>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<MessageBody>, ApiError> {
    let c: Collection = collection.parse()?;
    let id = parse_id(&id)?;
    store.delete(c, id).await?;
    Ok(Json(MessageBody::new("Item deleted")))
}
