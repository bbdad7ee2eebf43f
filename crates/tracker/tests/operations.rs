use chrono::NaiveDate;
use sea_orm::Database;
use uuid::Uuid;

use migration::MigratorTrait;
use tracker::{
    DEFAULT_PICTURE, ExpenseFields, MoneyCents, NewIncome, Tracker, TrackerError,
};

async fn tracker_with_db() -> Tracker {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let tracker = Tracker::builder().database(db).build();
    tracker.create_user("alice", "password").await.unwrap();
    tracker
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn expense(category_id: Uuid, cents: i64, day: NaiveDate) -> ExpenseFields {
    ExpenseFields {
        category_id,
        amount: MoneyCents::new(cents),
        description: None,
        date: day,
    }
}

#[tokio::test]
async fn signup_creates_profile_with_default_picture() {
    let tracker = tracker_with_db().await;

    let profile = tracker.profile("alice").await.unwrap();
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.picture, DEFAULT_PICTURE);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let tracker = tracker_with_db().await;

    let err = tracker.create_user("alice", "other").await.unwrap_err();
    assert!(matches!(err, TrackerError::ExistingKey(_)));
}

#[tokio::test]
async fn profile_picture_can_be_replaced() {
    let tracker = tracker_with_db().await;

    tracker
        .set_profile_picture("alice", "profile_pics/alice.png")
        .await
        .unwrap();
    let profile = tracker.profile("alice").await.unwrap();
    assert_eq!(profile.picture, "profile_pics/alice.png");
}

#[tokio::test]
async fn categories_are_scoped_per_user() {
    let tracker = tracker_with_db().await;
    tracker.create_user("bob", "password").await.unwrap();

    tracker.create_category("alice", "Food").await.unwrap();

    assert!(tracker.list_categories("bob").await.unwrap().is_empty());
    // Same name under a different owner is not a conflict.
    tracker.create_category("bob", "Food").await.unwrap();

    let err = tracker.create_category("alice", "Food").await.unwrap_err();
    assert!(matches!(err, TrackerError::ExistingKey(_)));
}

#[tokio::test]
async fn categories_are_listed_by_name() {
    let tracker = tracker_with_db().await;

    tracker.create_category("alice", "Transport").await.unwrap();
    tracker.create_category("alice", "Food").await.unwrap();

    let names: Vec<String> = tracker
        .list_categories("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Food".to_string(), "Transport".to_string()]);
}

#[tokio::test]
async fn category_in_use_cannot_be_deleted() {
    let tracker = tracker_with_db().await;

    let food = tracker.create_category("alice", "Food").await.unwrap();
    let spent = tracker
        .create_expense("alice", expense(food.id, 1000, date(2024, 3, 1)))
        .await
        .unwrap();

    let err = tracker.delete_category(food.id, "alice").await.unwrap_err();
    assert!(matches!(err, TrackerError::InUse(_)));

    tracker.delete_expense(spent.id, "alice").await.unwrap();
    tracker.delete_category(food.id, "alice").await.unwrap();
    assert!(tracker.list_categories("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn expense_round_trips_with_category_name() {
    let tracker = tracker_with_db().await;

    let food = tracker.create_category("alice", "Food").await.unwrap();
    let created = tracker
        .create_expense(
            "alice",
            ExpenseFields {
                category_id: food.id,
                amount: MoneyCents::new(4550),
                description: Some("groceries".to_string()),
                date: date(2024, 3, 15),
            },
        )
        .await
        .unwrap();

    let fetched = tracker.expense(created.id, "alice").await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.category_name, "Food");
    assert_eq!(fetched.amount, MoneyCents::new(4550));
    assert_eq!(fetched.description.as_deref(), Some("groceries"));
}

#[tokio::test]
async fn expense_requires_owned_category() {
    let tracker = tracker_with_db().await;
    tracker.create_user("bob", "password").await.unwrap();

    let food = tracker.create_category("alice", "Food").await.unwrap();

    let err = tracker
        .create_expense("bob", expense(food.id, 1000, date(2024, 3, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::KeyNotFound(_)));
    assert!(tracker.list_expenses("bob", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn expense_amount_must_be_positive() {
    let tracker = tracker_with_db().await;

    let food = tracker.create_category("alice", "Food").await.unwrap();
    for cents in [0, -100] {
        let err = tracker
            .create_expense("alice", expense(food.id, cents, date(2024, 3, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidAmount(_)));
    }
}

#[tokio::test]
async fn expenses_are_listed_newest_first() {
    let tracker = tracker_with_db().await;

    let food = tracker.create_category("alice", "Food").await.unwrap();
    for day in [date(2024, 3, 1), date(2024, 3, 20), date(2024, 3, 10)] {
        tracker
            .create_expense("alice", expense(food.id, 1000, day))
            .await
            .unwrap();
    }

    let dates: Vec<NaiveDate> = tracker
        .list_expenses("alice", None)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.date)
        .collect();
    assert_eq!(
        dates,
        vec![date(2024, 3, 20), date(2024, 3, 10), date(2024, 3, 1)]
    );

    let limited = tracker.list_expenses("alice", Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn update_replaces_expense_fields() {
    let tracker = tracker_with_db().await;

    let food = tracker.create_category("alice", "Food").await.unwrap();
    let transport = tracker.create_category("alice", "Transport").await.unwrap();
    let created = tracker
        .create_expense("alice", expense(food.id, 1000, date(2024, 3, 1)))
        .await
        .unwrap();

    let updated = tracker
        .update_expense(
            created.id,
            "alice",
            ExpenseFields {
                category_id: transport.id,
                amount: MoneyCents::new(2500),
                description: Some("bus pass".to_string()),
                date: date(2024, 3, 2),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.category_name, "Transport");
    assert_eq!(updated.amount, MoneyCents::new(2500));

    let fetched = tracker.expense(created.id, "alice").await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn failed_update_leaves_expense_untouched() {
    let tracker = tracker_with_db().await;

    let food = tracker.create_category("alice", "Food").await.unwrap();
    let created = tracker
        .create_expense("alice", expense(food.id, 1000, date(2024, 3, 1)))
        .await
        .unwrap();

    let err = tracker
        .update_expense(created.id, "alice", expense(food.id, 0, date(2024, 3, 2)))
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidAmount(_)));

    let fetched = tracker.expense(created.id, "alice").await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn foreign_expense_is_reported_as_not_found() {
    let tracker = tracker_with_db().await;
    tracker.create_user("bob", "password").await.unwrap();

    let food = tracker.create_category("alice", "Food").await.unwrap();
    let created = tracker
        .create_expense("alice", expense(food.id, 1000, date(2024, 3, 1)))
        .await
        .unwrap();

    let err = tracker.expense(created.id, "bob").await.unwrap_err();
    assert!(matches!(err, TrackerError::KeyNotFound(_)));

    let err = tracker.delete_expense(created.id, "bob").await.unwrap_err();
    assert!(matches!(err, TrackerError::KeyNotFound(_)));

    // Still there for the owner.
    assert_eq!(tracker.list_expenses("alice", None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn incomes_are_recorded_and_listed_newest_first() {
    let tracker = tracker_with_db().await;

    for (source, day) in [
        ("Salary", date(2024, 3, 1)),
        ("Freelance", date(2024, 3, 20)),
    ] {
        tracker
            .create_income(
                "alice",
                NewIncome {
                    source: source.to_string(),
                    amount: MoneyCents::new(100_000),
                    description: None,
                    date: day,
                },
            )
            .await
            .unwrap();
    }

    let sources: Vec<String> = tracker
        .list_incomes("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.source)
        .collect();
    assert_eq!(sources, vec!["Freelance".to_string(), "Salary".to_string()]);
}

#[tokio::test]
async fn income_requires_source_and_positive_amount() {
    let tracker = tracker_with_db().await;

    let err = tracker
        .create_income(
            "alice",
            NewIncome {
                source: "  ".to_string(),
                amount: MoneyCents::new(1000),
                description: None,
                date: date(2024, 3, 1),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidName(_)));

    let err = tracker
        .create_income(
            "alice",
            NewIncome {
                source: "Salary".to_string(),
                amount: MoneyCents::ZERO,
                description: None,
                date: date(2024, 3, 1),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidAmount(_)));
}

#[tokio::test]
async fn budget_upsert_overwrites_the_amount() {
    let tracker = tracker_with_db().await;

    let food = tracker.create_category("alice", "Food").await.unwrap();
    tracker
        .upsert_budget("alice", food.id, MoneyCents::new(30_000), 2024, 3)
        .await
        .unwrap();
    let second = tracker
        .upsert_budget("alice", food.id, MoneyCents::new(40_000), 2024, 3)
        .await
        .unwrap();
    assert_eq!(second.amount, MoneyCents::new(40_000));

    let budgets = tracker.budgets("alice", 2024, 3).await.unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets.get(&food.id), Some(&MoneyCents::new(40_000)));

    // A different period is a different key.
    assert!(tracker.budgets("alice", 2024, 4).await.unwrap().is_empty());
}

#[tokio::test]
async fn budget_rejects_negative_amount_and_bad_period() {
    let tracker = tracker_with_db().await;

    let food = tracker.create_category("alice", "Food").await.unwrap();
    let err = tracker
        .upsert_budget("alice", food.id, MoneyCents::new(-1), 2024, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidAmount(_)));

    let err = tracker
        .upsert_budget("alice", food.id, MoneyCents::new(1000), 2024, 13)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidDate(_)));

    let err = tracker
        .upsert_budget("alice", Uuid::new_v4(), MoneyCents::new(1000), 2024, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::KeyNotFound(_)));
}

#[tokio::test]
async fn category_totals_sum_one_month_for_one_owner() {
    let tracker = tracker_with_db().await;
    tracker.create_user("bob", "password").await.unwrap();

    let food = tracker.create_category("alice", "Food").await.unwrap();
    let transport = tracker.create_category("alice", "Transport").await.unwrap();
    let bob_food = tracker.create_category("bob", "Food").await.unwrap();

    tracker
        .create_expense("alice", expense(food.id, 2050, date(2024, 3, 5)))
        .await
        .unwrap();
    tracker
        .create_expense("alice", expense(food.id, 2500, date(2024, 3, 20)))
        .await
        .unwrap();
    tracker
        .create_expense("alice", expense(transport.id, 1200, date(2024, 3, 10)))
        .await
        .unwrap();
    // Outside the period and outside the owner, both invisible.
    tracker
        .create_expense("alice", expense(food.id, 9999, date(2024, 4, 1)))
        .await
        .unwrap();
    tracker
        .create_expense("bob", expense(bob_food.id, 7777, date(2024, 3, 15)))
        .await
        .unwrap();

    let totals = tracker.category_totals("alice", 2024, 3).await.unwrap();
    assert_eq!(
        totals,
        vec![
            ("Food".to_string(), MoneyCents::new(4550)),
            ("Transport".to_string(), MoneyCents::new(1200)),
        ]
    );
}

#[tokio::test]
async fn category_totals_empty_period_yields_nothing() {
    let tracker = tracker_with_db().await;

    let totals = tracker.category_totals("alice", 2024, 3).await.unwrap();
    assert!(totals.is_empty());
}
