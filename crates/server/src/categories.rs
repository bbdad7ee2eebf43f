//! Category management endpoints. These answer with JSON rather than HTML:
//! the dashboard form consumes the created id directly.

use api_types::category::{CategoryCreate, CategoryCreated};
use axum::{Extension, Json, extract::Path, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};
use tracker::users;

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryCreated>), ServerError> {
    let category = state
        .tracker
        .create_category(&user.username, &payload.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryCreated {
            id: category.id,
            name: category.name,
        }),
    ))
}

pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.tracker.delete_category(id, &user.username).await?;
    Ok(StatusCode::NO_CONTENT)
}
