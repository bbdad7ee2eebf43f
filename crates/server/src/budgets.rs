//! Budget endpoints. A budget is keyed by category and period; posting the
//! same key again overwrites the amount, so the form doubles as an editor.

use api_types::budget::BudgetForm;
use askama::Template;
use axum::{
    Extension,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::{Datelike, Local};
use serde::Deserialize;

use crate::{
    ServerError, forms,
    render::{self, CategoryOption, MonthOption, YearOption},
    server::ServerState,
};
use tracker::users;

pub(crate) struct BudgetRow {
    pub category: String,
    pub amount: String,
}

#[derive(Template)]
#[template(path = "budgets.html")]
pub(crate) struct BudgetsTemplate {
    pub categories: Vec<CategoryOption>,
    pub budgets: Vec<BudgetRow>,
    pub years: Vec<YearOption>,
    pub months: Vec<MonthOption>,
    pub year: i32,
    pub month: u32,
}

#[derive(Template)]
#[template(path = "partials/budget_table.html")]
pub(crate) struct BudgetTableTemplate {
    pub budgets: Vec<BudgetRow>,
}

#[derive(Deserialize)]
pub(crate) struct PeriodQuery {
    year: Option<i32>,
    month: Option<u32>,
}

/// Rows for the period, one per budgeted category, in category name order.
async fn budget_rows(
    state: &ServerState,
    owner: &str,
    year: i32,
    month: u32,
) -> Result<Vec<BudgetRow>, ServerError> {
    let categories = state.tracker.list_categories(owner).await?;
    let amounts = state.tracker.budgets(owner, year, month).await?;

    Ok(categories
        .into_iter()
        .filter_map(|category| {
            amounts.get(&category.id).map(|amount| BudgetRow {
                category: category.name,
                amount: amount.to_string(),
            })
        })
        .collect())
}

pub async fn show(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, ServerError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let categories = state.tracker.list_categories(&user.username).await?;
    let budgets = budget_rows(&state, &user.username, year, month).await?;

    let template = BudgetsTemplate {
        categories: render::category_options(&categories, None),
        budgets,
        years: render::year_options(today.year(), year),
        months: render::month_options(month),
        year,
        month,
    };
    render::render(StatusCode::OK, &template)
}

pub async fn upsert(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    axum::Form(payload): axum::Form<BudgetForm>,
) -> Result<Response, ServerError> {
    let category_id = forms::parse_category_id(&payload.category).map_err(ServerError::Generic)?;
    let amount = forms::parse_amount(&payload.amount).map_err(ServerError::Generic)?;

    state
        .tracker
        .upsert_budget(&user.username, category_id, amount, payload.year, payload.month)
        .await?;

    let template = BudgetTableTemplate {
        budgets: budget_rows(&state, &user.username, payload.year, payload.month).await?,
    };
    render::render(StatusCode::OK, &template)
}
