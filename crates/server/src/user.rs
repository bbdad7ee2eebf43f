//! Account creation. The only endpoint reachable without credentials.

use api_types::user::Signup;
use axum::{extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

pub async fn signup(
    State(state): State<ServerState>,
    axum::Form(payload): axum::Form<Signup>,
) -> Result<StatusCode, ServerError> {
    state
        .tracker
        .create_user(&payload.username, &payload.password)
        .await?;

    Ok(StatusCode::CREATED)
}
