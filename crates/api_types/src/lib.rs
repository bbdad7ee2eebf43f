use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Signup {
        pub username: String,
        pub password: String,
    }
}

pub mod profile {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileUpdate {
        pub picture: String,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreated {
        pub id: Uuid,
        pub name: String,
    }
}

pub mod expense {
    use super::*;

    /// Raw expense form fields.
    ///
    /// `amount` and `date` stay strings so a failed parse can re-render the
    /// form with the user's input intact.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseForm {
        pub date: String,
        pub category: String,
        pub amount: String,
        #[serde(default)]
        pub description: Option<String>,
    }
}

pub mod income {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct IncomeForm {
        pub date: String,
        pub source: String,
        pub amount: String,
        #[serde(default)]
        pub description: Option<String>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BudgetForm {
        pub category: String,
        pub amount: String,
        pub year: i32,
        pub month: u32,
    }
}
