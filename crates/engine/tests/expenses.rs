use chrono::{Datelike, Utc};
use sea_orm::Database;
use uuid::Uuid;

use engine::{Category, Engine, EngineError, ExpenseFields, PaymentMethod};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn fields(amount_minor: i64, description: &str, date: &str) -> ExpenseFields {
    ExpenseFields {
        amount_minor,
        description: description.to_string(),
        category: Category::FoodAndDining,
        date: date.parse().unwrap(),
        payment_method: PaymentMethod::Upi,
    }
}

#[tokio::test]
async fn create_then_list_includes_the_record_once() {
    let engine = engine_with_db().await;

    let id = engine
        .create_expense("alice", fields(10_000, "Lunch", "2024-03-05"))
        .await
        .unwrap();

    let expenses = engine.list_expenses("alice").await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, id);
    assert_eq!(expenses[0].amount_minor, 10_000);
    assert_eq!(expenses[0].description, "Lunch");
    assert_eq!(expenses[0].category, Category::FoodAndDining);
}

#[tokio::test]
async fn delete_then_list_excludes_the_record() {
    let engine = engine_with_db().await;

    let id = engine
        .create_expense("alice", fields(10_000, "Lunch", "2024-03-05"))
        .await
        .unwrap();
    engine.delete_expense("alice", id).await.unwrap();

    assert!(engine.list_expenses("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_most_recent_first() {
    let engine = engine_with_db().await;

    engine
        .create_expense("alice", fields(100, "older", "2024-03-01"))
        .await
        .unwrap();
    engine
        .create_expense("alice", fields(200, "newest", "2024-04-01"))
        .await
        .unwrap();
    engine
        .create_expense("alice", fields(300, "oldest", "2023-12-31"))
        .await
        .unwrap();

    let descriptions: Vec<String> = engine
        .list_expenses("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|expense| expense.description)
        .collect();
    assert_eq!(descriptions, ["newest", "older", "oldest"]);
}

#[tokio::test]
async fn records_are_scoped_to_their_owner() {
    let engine = engine_with_db().await;

    let id = engine
        .create_expense("alice", fields(10_000, "Lunch", "2024-03-05"))
        .await
        .unwrap();

    assert!(engine.list_expenses("bob").await.unwrap().is_empty());
    assert_eq!(
        engine
            .update_expense("bob", id, fields(1, "hijack", "2024-03-05"))
            .await,
        Err(EngineError::KeyNotFound("expense not exists".to_string()))
    );
    assert_eq!(
        engine.delete_expense("bob", id).await,
        Err(EngineError::KeyNotFound("expense not exists".to_string()))
    );

    // The owner still sees the untouched record.
    let expenses = engine.list_expenses("alice").await.unwrap();
    assert_eq!(expenses[0].description, "Lunch");
}

#[tokio::test]
async fn update_replaces_the_fields() {
    let engine = engine_with_db().await;

    let id = engine
        .create_expense("alice", fields(10_000, "Lunch", "2024-03-05"))
        .await
        .unwrap();

    let mut updated = fields(2_500, "Dinner", "2024-03-06");
    updated.category = Category::Entertainment;
    updated.payment_method = PaymentMethod::Card;
    engine.update_expense("alice", id, updated).await.unwrap();

    let expenses = engine.list_expenses("alice").await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount_minor, 2_500);
    assert_eq!(expenses[0].description, "Dinner");
    assert_eq!(expenses[0].category, Category::Entertainment);
    assert_eq!(expenses[0].payment_method, PaymentMethod::Card);
}

#[tokio::test]
async fn invalid_fields_never_reach_the_store() {
    let engine = engine_with_db().await;

    let err = engine
        .create_expense("alice", fields(0, "free lunch", "2024-03-05"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine
        .create_expense("alice", fields(100, "  ", "2024-03-05"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    assert!(engine.list_expenses("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_expense_is_not_found() {
    let engine = engine_with_db().await;
    let err = engine
        .delete_expense("alice", Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn available_years_defaults_to_the_current_year() {
    let engine = engine_with_db().await;
    let today = Utc::now().date_naive();

    assert_eq!(
        engine.available_years("alice", today).await.unwrap(),
        vec![today.year()]
    );

    engine
        .create_expense("alice", fields(100, "a", "2022-06-01"))
        .await
        .unwrap();
    engine
        .create_expense("alice", fields(100, "b", "2024-06-01"))
        .await
        .unwrap();
    engine
        .create_expense("alice", fields(100, "c", "2022-01-01"))
        .await
        .unwrap();

    assert_eq!(
        engine.available_years("alice", today).await.unwrap(),
        vec![2024, 2022]
    );
}
