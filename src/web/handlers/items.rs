use salvo::prelude::*;
use tracing::debug;

use crate::db::{Item, NewItem};
use crate::web::error::ApiError;
use crate::web::web_state;

fn item_id(req: &mut Request) -> Result<i64, ApiError> {
    req.param::<i64>("id").ok_or(ApiError::InvalidId)
}

/// Decodes the JSON body regardless of the declared content type.
async fn item_payload(req: &mut Request) -> Result<NewItem, ApiError> {
    let body = req
        .payload()
        .await
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    serde_json::from_slice::<NewItem>(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

async fn fetch_items(depot: &Depot) -> Result<Vec<Item>, ApiError> {
    web_state(depot)?
        .items
        .list_items()
        .await
        .map_err(ApiError::storage("Failed to retrieve items"))
}

async fn fetch_item(req: &mut Request, depot: &Depot) -> Result<Item, ApiError> {
    let id = item_id(req)?;
    web_state(depot)?
        .items
        .get_item(id)
        .await
        .map_err(ApiError::storage("Failed to retrieve item"))?
        .ok_or(ApiError::NotFound)
}

async fn insert_item(req: &mut Request, depot: &Depot) -> Result<Item, ApiError> {
    let payload = item_payload(req).await?;
    let item = web_state(depot)?
        .items
        .create_item(&payload.name)
        .await
        .map_err(ApiError::storage("Failed to create item"))?;
    debug!("created item {}", item.id);
    Ok(item)
}

async fn replace_item(req: &mut Request, depot: &Depot) -> Result<Item, ApiError> {
    let id = item_id(req)?;
    let payload = item_payload(req).await?;
    web_state(depot)?
        .items
        .update_item(id, &payload.name)
        .await
        .map_err(ApiError::storage("Failed to update item"))?
        .ok_or(ApiError::NotFound)
}

async fn remove_item(req: &mut Request, depot: &Depot) -> Result<(), ApiError> {
    let id = item_id(req)?;
    let deleted = web_state(depot)?
        .items
        .delete_item(id)
        .await
        .map_err(ApiError::storage("Failed to delete item"))?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    debug!("deleted item {}", id);
    Ok(())
}

#[handler]
pub async fn list_items(depot: &mut Depot, res: &mut Response) {
    match fetch_items(depot).await {
        Ok(items) => res.render(Json(items)),
        Err(err) => res.render(err),
    }
}

#[handler]
pub async fn get_item(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match fetch_item(req, depot).await {
        Ok(item) => res.render(Json(item)),
        Err(err) => res.render(err),
    }
}

#[handler]
pub async fn create_item(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match insert_item(req, depot).await {
        Ok(item) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(item));
        }
        Err(err) => res.render(err),
    }
}

#[handler]
pub async fn update_item(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match replace_item(req, depot).await {
        Ok(item) => res.render(Json(item)),
        Err(err) => res.render(err),
    }
}

#[handler]
pub async fn delete_item(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match remove_item(req, depot).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(err) => res.render(err),
    }
}
