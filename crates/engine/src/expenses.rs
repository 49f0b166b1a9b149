//! Expense primitives.
//!
//! An `Expense` is a single spending event owned by exactly one user. The
//! store assigns the id; everything else comes from the owner's submission.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, EngineError, PaymentMethod, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub owner_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
}

/// The fields of an expense as submitted on create/update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFields {
    pub amount_minor: i64,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
}

impl Expense {
    pub fn new(owner_id: String, fields: ExpenseFields) -> ResultEngine<Self> {
        validate_fields(&fields)?;
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            amount_minor: fields.amount_minor,
            description: fields.description,
            category: fields.category,
            date: fields.date,
            payment_method: fields.payment_method,
        })
    }
}

/// Checks the submitted fields before anything reaches the database.
pub(crate) fn validate_fields(fields: &ExpenseFields) -> ResultEngine<()> {
    if fields.amount_minor <= 0 {
        return Err(EngineError::Validation(
            "amount_minor must be > 0".to_string(),
        ));
    }
    if fields.description.trim().is_empty() {
        return Err(EngineError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub category: String,
    pub date: Date,
    pub payment_method: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            owner_id: ActiveValue::Set(expense.owner_id.clone()),
            amount_minor: ActiveValue::Set(expense.amount_minor),
            description: ActiveValue::Set(expense.description.clone()),
            category: ActiveValue::Set(expense.category.as_str().to_string()),
            date: ActiveValue::Set(expense.date),
            payment_method: ActiveValue::Set(expense.payment_method.as_str().to_string()),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("expense not exists".to_string()))?,
            owner_id: model.owner_id,
            amount_minor: model.amount_minor,
            description: model.description,
            category: Category::try_from(model.category.as_str())?,
            date: model.date,
            payment_method: PaymentMethod::try_from(model.payment_method.as_str())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ExpenseFields {
        ExpenseFields {
            amount_minor: 10_000,
            description: "Lunch".to_string(),
            category: Category::FoodAndDining,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            payment_method: PaymentMethod::Upi,
        }
    }

    #[test]
    fn new_assigns_an_id() {
        let expense = Expense::new("alice".to_string(), fields()).unwrap();
        assert_eq!(expense.owner_id, "alice");
        assert_eq!(expense.amount_minor, 10_000);
    }

    #[test]
    fn new_rejects_non_positive_amount() {
        let mut bad = fields();
        bad.amount_minor = 0;
        assert!(matches!(
            Expense::new("alice".to_string(), bad),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn new_rejects_blank_description() {
        let mut bad = fields();
        bad.description = "   ".to_string();
        assert!(matches!(
            Expense::new("alice".to_string(), bad),
            Err(EngineError::Validation(_))
        ));
    }
}
