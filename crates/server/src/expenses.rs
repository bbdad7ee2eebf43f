//! Expense endpoints. Mutations answer with HTML fragments so htmx can
//! swap single table rows instead of reloading the page.

use api_types::expense::ExpenseForm;
use askama::Template;
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    ServerError, forms,
    render::{self, CategoryOption, ExpenseFormContext, ExpenseRow},
    server::ServerState,
};
use tracker::{ExpenseFields, TrackerError, users};

#[derive(Template)]
#[template(path = "partials/expense_row.html")]
pub(crate) struct ExpenseRowTemplate {
    pub row: ExpenseRow,
}

#[derive(Template)]
#[template(path = "partials/expense_form.html")]
pub(crate) struct ExpenseFormTemplate {
    pub categories: Vec<CategoryOption>,
    pub form: ExpenseFormContext,
}

#[derive(Template)]
#[template(path = "partials/expense_edit_form.html")]
pub(crate) struct ExpenseEditTemplate {
    pub categories: Vec<CategoryOption>,
    pub form: ExpenseFormContext,
}

fn parse_fields(payload: &ExpenseForm) -> Result<ExpenseFields, Vec<String>> {
    let date = forms::parse_date(&payload.date);
    let category_id = forms::parse_category_id(&payload.category);
    let amount = forms::parse_amount(&payload.amount);

    match (date, category_id, amount) {
        (Ok(date), Ok(category_id), Ok(amount)) => Ok(ExpenseFields {
            category_id,
            amount,
            description: payload.description.clone(),
            date,
        }),
        (date, category_id, amount) => Err([date.err(), category_id.err(), amount.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}

fn is_validation(err: &TrackerError) -> bool {
    matches!(
        err,
        TrackerError::InvalidAmount(_) | TrackerError::InvalidName(_) | TrackerError::InvalidDate(_)
    )
}

fn rejected_context(id: &str, payload: &ExpenseForm, errors: Vec<String>) -> ExpenseFormContext {
    ExpenseFormContext {
        id: id.to_string(),
        date: payload.date.clone(),
        amount: payload.amount.clone(),
        description: payload.description.clone().unwrap_or_default(),
        errors,
    }
}

/// Re-render the creation form with the submitted values and error messages.
async fn rejected_create(
    state: &ServerState,
    username: &str,
    payload: &ExpenseForm,
    errors: Vec<String>,
) -> Result<Response, ServerError> {
    let categories = state.tracker.list_categories(username).await?;
    let selected = Uuid::parse_str(payload.category.trim()).ok();
    let template = ExpenseFormTemplate {
        categories: render::category_options(&categories, selected),
        form: rejected_context("", payload, errors),
    };
    render::render(StatusCode::UNPROCESSABLE_ENTITY, &template)
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    axum::Form(payload): axum::Form<ExpenseForm>,
) -> Result<Response, ServerError> {
    let fields = match parse_fields(&payload) {
        Ok(fields) => fields,
        Err(errors) => return rejected_create(&state, &user.username, &payload, errors).await,
    };

    match state.tracker.create_expense(&user.username, fields).await {
        Ok(expense) => {
            let template = ExpenseRowTemplate {
                row: ExpenseRow::from(&expense),
            };
            render::render(StatusCode::CREATED, &template)
        }
        Err(err) if is_validation(&err) => {
            rejected_create(&state, &user.username, &payload, vec![err.to_string()]).await
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn row(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServerError> {
    let expense = state.tracker.expense(id, &user.username).await?;
    let template = ExpenseRowTemplate {
        row: ExpenseRow::from(&expense),
    };
    render::render(StatusCode::OK, &template)
}

pub async fn edit_form(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServerError> {
    let expense = state.tracker.expense(id, &user.username).await?;
    let categories = state.tracker.list_categories(&user.username).await?;

    let template = ExpenseEditTemplate {
        categories: render::category_options(&categories, Some(expense.category_id)),
        form: ExpenseFormContext::from(&expense),
    };
    render::render(StatusCode::OK, &template)
}

/// Re-render the in-row edit form with the submitted values and errors.
async fn rejected_update(
    state: &ServerState,
    username: &str,
    id: Uuid,
    payload: &ExpenseForm,
    errors: Vec<String>,
) -> Result<Response, ServerError> {
    let categories = state.tracker.list_categories(username).await?;
    let selected = Uuid::parse_str(payload.category.trim()).ok();
    let template = ExpenseEditTemplate {
        categories: render::category_options(&categories, selected),
        form: rejected_context(&id.to_string(), payload, errors),
    };
    render::render(StatusCode::UNPROCESSABLE_ENTITY, &template)
}

pub async fn update(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    axum::Form(payload): axum::Form<ExpenseForm>,
) -> Result<Response, ServerError> {
    let fields = match parse_fields(&payload) {
        Ok(fields) => fields,
        Err(errors) => {
            return rejected_update(&state, &user.username, id, &payload, errors).await;
        }
    };

    match state.tracker.update_expense(id, &user.username, fields).await {
        Ok(expense) => {
            let template = ExpenseRowTemplate {
                row: ExpenseRow::from(&expense),
            };
            render::render(StatusCode::OK, &template)
        }
        Err(err) if is_validation(&err) => {
            rejected_update(&state, &user.username, id, &payload, vec![err.to_string()]).await
        }
        Err(err) => Err(err.into()),
    }
}

/// Deleting twice is fine: a row that is already gone still answers with an
/// empty success so htmx removes it from the table either way.
pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServerError> {
    match state.tracker.delete_expense(id, &user.username).await {
        Ok(()) | Err(TrackerError::KeyNotFound(_)) => Ok(StatusCode::OK.into_response()),
        Err(err) => Err(err.into()),
    }
}
