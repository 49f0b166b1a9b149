use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

pub use categories::Category;
pub use error::EngineError;
pub use expenses::{Expense, ExpenseFields};
pub use filter::{DateRange, ExpenseFilter};
pub use gate::{Gate, GatePolicy, GateState};
pub use money::MoneyPaise;
pub use payment_methods::PaymentMethod;
pub use period::{Period, ViewMode};

pub mod aggregate;
mod categories;
mod error;
mod expenses;
mod filter;
mod gate;
mod money;
mod payment_methods;
pub mod period;

type ResultEngine<T> = Result<T, EngineError>;

/// The store layer: owner-scoped CRUD over expense records.
///
/// Reads feed the pure pipeline stages ([`ExpenseFilter`], [`Period`],
/// [`aggregate`]); writes go straight through. There is no caching and no
/// cross-request state: the database is the single source of truth.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Lists every expense owned by `owner_id`, most recent first.
    pub async fn list_expenses(&self, owner_id: &str) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::OwnerId.eq(owner_id))
            .order_by_desc(expenses::Column::Date)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Expense::try_from(model)?);
        }
        Ok(out)
    }

    /// Creates an expense for `owner_id` and returns the assigned id.
    ///
    /// Field validation happens before the database is touched.
    pub async fn create_expense(
        &self,
        owner_id: &str,
        fields: ExpenseFields,
    ) -> ResultEngine<Uuid> {
        let expense = Expense::new(owner_id.to_string(), fields)?;
        expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Ok(expense.id)
    }

    /// Replaces the fields of an owned expense.
    pub async fn update_expense(
        &self,
        owner_id: &str,
        id: Uuid,
        fields: ExpenseFields,
    ) -> ResultEngine<()> {
        expenses::validate_fields(&fields)?;
        let model = self.owned_expense(owner_id, id).await?;

        let mut active: expenses::ActiveModel = model.into();
        active.amount_minor = ActiveValue::Set(fields.amount_minor);
        active.description = ActiveValue::Set(fields.description);
        active.category = ActiveValue::Set(fields.category.as_str().to_string());
        active.date = ActiveValue::Set(fields.date);
        active.payment_method = ActiveValue::Set(fields.payment_method.as_str().to_string());
        active.update(&self.database).await?;
        Ok(())
    }

    /// Deletes an owned expense.
    pub async fn delete_expense(&self, owner_id: &str, id: Uuid) -> ResultEngine<()> {
        let model = self.owned_expense(owner_id, id).await?;
        model.delete(&self.database).await?;
        Ok(())
    }

    /// Distinct years across all of an owner's expenses, newest first;
    /// `[today.year()]` when there are none.
    pub async fn available_years(
        &self,
        owner_id: &str,
        today: NaiveDate,
    ) -> ResultEngine<Vec<i32>> {
        let all = self.list_expenses(owner_id).await?;
        Ok(aggregate::available_years(&all, today))
    }

    async fn owned_expense(&self, owner_id: &str, id: Uuid) -> ResultEngine<expenses::Model> {
        let model = expenses::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))?;

        // Foreign records are indistinguishable from missing ones.
        if model.owner_id != owner_id {
            return Err(EngineError::KeyNotFound("expense not exists".to_string()));
        }
        Ok(model)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
