use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, Error as AxumError, Header, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{analytics, budgets, categories, dashboard, expenses, incomes, profile, user};
use tracker::{Tracker, users};

static HX_REQUEST_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("hx-request");

#[derive(Clone)]
pub struct ServerState {
    pub tracker: Arc<Tracker>,
    pub db: DatabaseConnection,
}

/// `TypedHeader` for the `HX-Request` header.
///
/// htmx sets it on every request it issues; its presence selects the
/// fragment rendering of an endpoint instead of the full page.
#[derive(Debug)]
pub(crate) struct HxRequest;

impl Header for HxRequest {
    fn name() -> &'static axum::http::HeaderName {
        &HX_REQUEST_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        if value != "true" {
            return Err(AxumError::invalid());
        }

        Ok(HxRequest)
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        values.extend(std::iter::once(axum::http::HeaderValue::from_static("true")));
    }
}

async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user: Option<users::Model> = users::Entity::find()
        .filter(users::Column::Username.eq(auth_header.username()))
        .filter(users::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = if let Some(user) = user {
        user
    } else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    let public = Router::new().route("/signup", post(user::signup));

    let protected = Router::new()
        .route("/dashboard", get(dashboard::show))
        .route("/expenses", post(expenses::create))
        .route(
            "/expenses/{id}",
            get(expenses::row)
                .put(expenses::update)
                .delete(expenses::remove),
        )
        .route("/expenses/{id}/edit", get(expenses::edit_form))
        .route("/analytics", get(analytics::show))
        .route("/incomes", get(incomes::list).post(incomes::create))
        .route("/budgets", get(budgets::show).post(budgets::upsert))
        .route("/categories", post(categories::create))
        .route(
            "/categories/{id}",
            axum::routing::delete(categories::remove),
        )
        .route("/profile", get(profile::show).post(profile::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
}

/// Build the application router. Exposed so tests can drive it with
/// `tower::ServiceExt::oneshot` without binding a socket.
pub fn app(tracker: Tracker, db: DatabaseConnection) -> Router {
    let state = ServerState {
        tracker: Arc::new(tracker),
        db,
    };
    router(state)
}

pub async fn run(tracker: Tracker, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(tracker, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    tracker: Tracker,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(tracker, db)).await
}

pub fn spawn_with_listener(
    tracker: Tracker,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(tracker, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
