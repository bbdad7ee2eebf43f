//! Template rendering helper and the view structs shared by the page and
//! fragment templates.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracker::{Category, Expense, Income};
use uuid::Uuid;

use crate::ServerError;

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) fn render<T: Template>(status: StatusCode, template: &T) -> Result<Response, ServerError> {
    let body = template.render()?;
    Ok((status, Html(body)).into_response())
}

pub(crate) struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category_name.clone(),
            amount: expense.amount.to_string(),
            description: expense.description.clone().unwrap_or_default(),
        }
    }
}

pub(crate) struct IncomeRow {
    pub date: String,
    pub source: String,
    pub amount: String,
    pub description: String,
}

impl From<&Income> for IncomeRow {
    fn from(income: &Income) -> Self {
        Self {
            date: income.date.format("%Y-%m-%d").to_string(),
            source: income.source.clone(),
            amount: income.amount.to_string(),
            description: income.description.clone().unwrap_or_default(),
        }
    }
}

pub(crate) struct CategoryOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

pub(crate) fn category_options(
    categories: &[Category],
    selected: Option<Uuid>,
) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|category| CategoryOption {
            id: category.id.to_string(),
            name: category.name.clone(),
            selected: selected == Some(category.id),
        })
        .collect()
}

/// Raw values shown in an expense form, either empty for a new expense or
/// echoing a rejected submission so the user's input is not lost.
pub(crate) struct ExpenseFormContext {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub description: String,
    pub errors: Vec<String>,
}

impl ExpenseFormContext {
    pub(crate) fn empty() -> Self {
        Self {
            id: String::new(),
            date: String::new(),
            amount: String::new(),
            description: String::new(),
            errors: Vec::new(),
        }
    }
}

impl From<&Expense> for ExpenseFormContext {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            amount: expense.amount.to_string(),
            description: expense.description.clone().unwrap_or_default(),
            errors: Vec::new(),
        }
    }
}

pub(crate) struct IncomeFormContext {
    pub date: String,
    pub source: String,
    pub amount: String,
    pub description: String,
    pub errors: Vec<String>,
}

impl IncomeFormContext {
    pub(crate) fn empty() -> Self {
        Self {
            date: String::new(),
            source: String::new(),
            amount: String::new(),
            description: String::new(),
            errors: Vec::new(),
        }
    }
}

pub(crate) struct MonthOption {
    pub number: u32,
    pub name: &'static str,
    pub selected: bool,
}

pub(crate) fn month_options(selected: u32) -> Vec<MonthOption> {
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| MonthOption {
            number: index as u32 + 1,
            name,
            selected: index as u32 + 1 == selected,
        })
        .collect()
}

pub(crate) struct YearOption {
    pub year: i32,
    pub selected: bool,
}

/// The current year and the four before it, newest first.
pub(crate) fn year_options(current: i32, selected: i32) -> Vec<YearOption> {
    (current - 4..=current)
        .rev()
        .map(|year| YearOption {
            year,
            selected: year == selected,
        })
        .collect()
}
