use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::{Comment, NewShop, ShopRecord};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ApiError;
use crate::identity::Caller;
use crate::state::ServerState;

const DEFAULT_SORT: &str = "highest";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub sortby: Option<String>,
}

/// Comment payload. `review` arrives either as a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct CommentInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub review: Value,
}

impl CommentInput {
    fn review_text(&self) -> String {
        match &self.review {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => String::new(),
        }
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ShopRecord>>, ApiError> {
    let key = q.sortby.as_deref().unwrap_or(DEFAULT_SORT);
    Ok(Json(state.shops.list(key).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Caller(caller): Caller,
    Json(input): Json<NewShop>,
) -> Result<Json<ShopRecord>, ApiError> {
    Ok(Json(state.shops.create(&caller.user_id, input).await?))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ShopRecord>, ApiError> {
    Ok(Json(state.shops.get_by_id(&id).await?))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Caller(caller): Caller,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.shops.delete(&id, &caller.user_id).await?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

pub async fn like(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Caller(caller): Caller,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.shops.like(&id, &caller.user_id).await?))
}

pub async fn unlike(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Caller(caller): Caller,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.shops.unlike(&id, &caller.user_id).await?))
}

pub async fn add_comment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Caller(caller): Caller,
    Json(input): Json<CommentInput>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let review = input.review_text();
    Ok(Json(state.shops.add_comment(&id, &caller, &input.text, &review).await?))
}

pub async fn remove_comment(
    State(state): State<ServerState>,
    Path((id, comment_id)): Path<(String, String)>,
    Caller(caller): Caller,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(state.shops.remove_comment(&id, &comment_id, &caller.user_id).await?))
}
