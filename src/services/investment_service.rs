use rust_decimal::Decimal;
use sea_orm::{ DatabaseConnection, TransactionTrait };
use serde::Deserialize;
use serde_json::Value;

use crate::db::entity::{ investment, strategy };
use crate::db::{ InvestmentRepository, StrategyRepository, UserRepository };
use crate::error::{ AppError, Result };
use crate::validation::{
    deserialize_present,
    parse_boolean,
    parse_decimal,
    parse_integer,
    Rule,
    Validator,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvestmentPayload {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub user_id: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub strategy_id: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub successful: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub amount: Option<Value>,
}

/// Returns on an investment: the strategy's yield when it succeeded, its
/// relief otherwise. `None` when the product does not fit in a `Decimal`.
pub fn compute_returns(
    successful: bool,
    amount: Decimal,
    strategy: &strategy::Model
) -> Option<Decimal> {
    let rate = if successful { strategy.yield_rate } else { strategy.relief };
    amount.checked_mul(rate)
}

pub struct InvestmentService {
    db: DatabaseConnection,
}

impl InvestmentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_investments(&self) -> Result<Vec<investment::Model>> {
        InvestmentRepository::find_all(&self.db).await
    }

    /// Records an investment. `returns` is derived from the strategy's rates
    /// as they are now and stored; later rate changes leave it untouched.
    pub async fn create_investment(&self, payload: InvestmentPayload) -> Result<investment::Model> {
        let mut validator = Validator::new();
        let user_id = validator.required("user_id", payload.user_id.as_ref(), parse_integer);
        let strategy_id = validator.required(
            "strategy_id",
            payload.strategy_id.as_ref(),
            parse_integer
        );
        let successful = validator.required("successful", payload.successful.as_ref(), parse_boolean);
        let amount = validator.required("amount", payload.amount.as_ref(), parse_amount);

        let txn = self.db.begin().await?;

        let user = match user_id {
            Some(id) => UserRepository::find_by_id(&txn, id).await?,
            None => None,
        };
        if user_id.is_some() && user.is_none() {
            validator.reject("user_id", Rule::Exists);
        }

        let strategy = match strategy_id {
            Some(id) => StrategyRepository::find_by_id(&txn, id).await?,
            None => None,
        };
        if strategy_id.is_some() && strategy.is_none() {
            validator.reject("strategy_id", Rule::Exists);
        }

        let (Some(user), Some(strategy), Some(successful), Some(amount)) = (
            user,
            strategy,
            successful,
            amount,
        ) else {
            txn.rollback().await?;
            return Err(validator.into_errors().into());
        };

        let Some(returns) = compute_returns(successful, amount, &strategy) else {
            txn.rollback().await?;
            validator.reject("amount", Rule::TooLarge);
            return Err(validator.into_errors().into());
        };

        let investment = InvestmentRepository::create(
            &txn,
            user.id,
            strategy.id,
            successful,
            amount,
            returns
        ).await?;

        txn.commit().await?;

        tracing::info!(
            investment_id = investment.id,
            user_id = user.id,
            strategy_id = strategy.id,
            successful,
            %returns,
            "Recorded investment"
        );

        Ok(investment)
    }

    pub async fn get_investment(&self, id: i32) -> Result<investment::Model> {
        InvestmentRepository::find_by_id(&self.db, id).await?.ok_or_else(||
            AppError::investment_not_found(id)
        )
    }

    pub async fn delete_investment(&self, id: i32) -> Result<()> {
        let deleted = InvestmentRepository::delete(&self.db, id).await?;

        if deleted == 0 {
            return Err(AppError::investment_not_found(id));
        }

        tracing::info!(investment_id = id, "Deleted investment");

        Ok(())
    }
}

fn parse_amount(value: &Value) -> std::result::Result<Decimal, Rule> {
    let amount = parse_decimal(value)?;
    if amount > Decimal::ZERO { Ok(amount) } else { Err(Rule::Positive) }
}
