//! `/users` routes.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use emoteport_aggregator::UserService;
use emoteport_core::model::{Badge, ChannelIdentity, Emote};
use tracing::debug;

use crate::error::ApiError;

pub type SharedService = Arc<UserService>;

pub fn users_router(service: SharedService) -> Router {
    Router::new()
        .route("/users/search/{user_name}", get(search_handler))
        .route("/users/{user_name}", get(identity_handler))
        .route("/users/{user_name}/emotes", get(emotes_handler))
        .route("/users/{user_name}/badges", get(badges_handler))
        .with_state(service)
}

async fn search_handler(
    State(service): State<SharedService>,
    Path(user_name): Path<String>,
) -> Result<Json<Vec<ChannelIdentity>>, ApiError> {
    if user_name.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "userName",
            message: "userName must contain at least 1 character".into(),
        });
    }
    let hits = service.search(&user_name).await;
    debug!(query = %user_name, hits = hits.len(), "Search served");
    Ok(Json(hits))
}

async fn identity_handler(
    State(service): State<SharedService>,
    Path(user_name): Path<String>,
) -> Result<Json<ChannelIdentity>, ApiError> {
    Ok(Json(service.get_identity(&user_name).await?))
}

async fn emotes_handler(
    State(service): State<SharedService>,
    Path(user_name): Path<String>,
) -> Result<Json<Vec<Emote>>, ApiError> {
    Ok(Json(service.get_emotes(&user_name).await?))
}

async fn badges_handler(
    State(service): State<SharedService>,
    Path(user_name): Path<String>,
) -> Result<Json<Vec<Badge>>, ApiError> {
    Ok(Json(service.get_badges(&user_name).await?))
}
