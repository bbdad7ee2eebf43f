//! Main page: recent expenses plus the creation form.

use askama::Template;
use axum::{Extension, extract::State, http::StatusCode, response::Response};

use crate::{
    ServerError,
    render::{self, CategoryOption, ExpenseFormContext, ExpenseRow},
    server::ServerState,
};
use tracker::users;

/// How many expenses the dashboard shows at most.
const RECENT_EXPENSES: u64 = 50;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub(crate) struct DashboardTemplate {
    pub expenses: Vec<ExpenseRow>,
    pub categories: Vec<CategoryOption>,
    pub form: ExpenseFormContext,
}

pub async fn show(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Response, ServerError> {
    let expenses = state
        .tracker
        .list_expenses(&user.username, Some(RECENT_EXPENSES))
        .await?;
    let categories = state.tracker.list_categories(&user.username).await?;

    let template = DashboardTemplate {
        expenses: expenses.iter().map(ExpenseRow::from).collect(),
        categories: render::category_options(&categories, None),
        form: ExpenseFormContext::empty(),
    };
    render::render(StatusCode::OK, &template)
}
