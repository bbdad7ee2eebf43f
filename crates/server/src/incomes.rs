//! Income endpoints. Incomes are append-only: the page lists them and the
//! form adds new ones, there is no edit or delete.

use api_types::income::IncomeForm;
use askama::Template;
use axum::{Extension, extract::State, http::StatusCode, response::Response};

use crate::{
    ServerError, forms,
    render::{self, IncomeFormContext, IncomeRow},
    server::ServerState,
};
use tracker::{NewIncome, TrackerError, users};

#[derive(Template)]
#[template(path = "incomes.html")]
pub(crate) struct IncomesTemplate {
    pub incomes: Vec<IncomeRow>,
    pub form: IncomeFormContext,
}

#[derive(Template)]
#[template(path = "partials/income_row.html")]
pub(crate) struct IncomeRowTemplate {
    pub row: IncomeRow,
}

#[derive(Template)]
#[template(path = "partials/income_form.html")]
pub(crate) struct IncomeFormTemplate {
    pub form: IncomeFormContext,
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Response, ServerError> {
    let incomes = state.tracker.list_incomes(&user.username).await?;

    let template = IncomesTemplate {
        incomes: incomes.iter().map(IncomeRow::from).collect(),
        form: IncomeFormContext::empty(),
    };
    render::render(StatusCode::OK, &template)
}

fn parse_fields(payload: &IncomeForm) -> Result<NewIncome, Vec<String>> {
    let date = forms::parse_date(&payload.date);
    let amount = forms::parse_amount(&payload.amount);

    match (date, amount) {
        (Ok(date), Ok(amount)) => Ok(NewIncome {
            source: payload.source.clone(),
            amount,
            description: payload.description.clone(),
            date,
        }),
        (date, amount) => Err([date.err(), amount.err()].into_iter().flatten().collect()),
    }
}

fn rejected_form(payload: &IncomeForm, errors: Vec<String>) -> Result<Response, ServerError> {
    let template = IncomeFormTemplate {
        form: IncomeFormContext {
            date: payload.date.clone(),
            source: payload.source.clone(),
            amount: payload.amount.clone(),
            description: payload.description.clone().unwrap_or_default(),
            errors,
        },
    };
    render::render(StatusCode::UNPROCESSABLE_ENTITY, &template)
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    axum::Form(payload): axum::Form<IncomeForm>,
) -> Result<Response, ServerError> {
    let fields = match parse_fields(&payload) {
        Ok(fields) => fields,
        Err(errors) => return rejected_form(&payload, errors),
    };

    match state.tracker.create_income(&user.username, fields).await {
        Ok(income) => {
            let template = IncomeRowTemplate {
                row: IncomeRow::from(&income),
            };
            render::render(StatusCode::CREATED, &template)
        }
        Err(
            err @ (TrackerError::InvalidAmount(_)
            | TrackerError::InvalidName(_)
            | TrackerError::InvalidDate(_)),
        ) => rejected_form(&payload, vec![err.to_string()]),
        Err(err) => Err(err.into()),
    }
}
