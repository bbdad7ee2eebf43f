pub use budgets::Budget;
pub use categories::Category;
pub use error::TrackerError;
pub use expenses::{Expense, ExpenseFields};
pub use incomes::{Income, NewIncome};
pub use money::MoneyCents;
pub use ops::{Tracker, TrackerBuilder};
pub use profiles::{DEFAULT_PICTURE, Profile};

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod incomes;
pub mod profiles;
pub mod users;

mod error;
mod money;
mod ops;

type ResultTracker<T> = Result<T, TrackerError>;
