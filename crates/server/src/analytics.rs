//! Spending breakdown per category, rendered as a pie chart.
//!
//! htmx requests get just the chart fragment so the period selector can
//! refresh it in place; plain requests get the full page.

use askama::Template;
use axum::{
    Extension,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use axum_extra::TypedHeader;
use chrono::{Datelike, Local};
use serde::Deserialize;

use crate::{
    ServerError, chart,
    render::{self, MonthOption, YearOption},
    server::{HxRequest, ServerState},
};
use tracker::users;

#[derive(Template)]
#[template(path = "analytics.html")]
pub(crate) struct AnalyticsTemplate {
    pub years: Vec<YearOption>,
    pub months: Vec<MonthOption>,
    pub chart: String,
}

#[derive(Template)]
#[template(path = "partials/chart.html")]
pub(crate) struct ChartTemplate {
    pub chart: String,
}

#[derive(Deserialize)]
pub(crate) struct PeriodQuery {
    year: Option<i32>,
    month: Option<u32>,
}

pub async fn show(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    hx_request: Option<TypedHeader<HxRequest>>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, ServerError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let totals = state
        .tracker
        .category_totals(&user.username, year, month)
        .await?;
    let chart = chart::pie_chart(&totals);

    if hx_request.is_some() {
        return render::render(StatusCode::OK, &ChartTemplate { chart });
    }

    let template = AnalyticsTemplate {
        years: render::year_options(today.year(), year),
        months: render::month_options(month),
        chart,
    };
    render::render(StatusCode::OK, &template)
}
