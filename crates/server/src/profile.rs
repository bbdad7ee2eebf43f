//! Profile page: shows the picture and lets the user point it elsewhere.

use api_types::profile::ProfileUpdate;
use askama::Template;
use axum::{Extension, extract::State, http::StatusCode, response::Response};

use crate::{ServerError, render, server::ServerState};
use tracker::users;

#[derive(Template)]
#[template(path = "profile.html")]
pub(crate) struct ProfileTemplate {
    pub username: String,
    pub picture: String,
}

pub async fn show(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Response, ServerError> {
    let profile = state.tracker.profile(&user.username).await?;

    let template = ProfileTemplate {
        username: profile.username,
        picture: profile.picture,
    };
    render::render(StatusCode::OK, &template)
}

pub async fn update(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    axum::Form(payload): axum::Form<ProfileUpdate>,
) -> Result<Response, ServerError> {
    state
        .tracker
        .set_profile_picture(&user.username, &payload.picture)
        .await?;
    let profile = state.tracker.profile(&user.username).await?;

    let template = ProfileTemplate {
        username: profile.username,
        picture: profile.picture,
    };
    render::render(StatusCode::OK, &template)
}
