use sea_orm::{ DatabaseConnection, TransactionTrait };
use serde::Deserialize;
use serde_json::Value;

use crate::config::DeletePolicy;
use crate::db::entity::{ investment, strategy };
use crate::db::{ InvestmentRepository, StrategyRepository };
use crate::error::{ AppError, Result };
use crate::validation::{
    deserialize_present,
    parse_decimal,
    parse_integer,
    parse_string,
    Rule,
    Validator,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategyPayload {
    #[serde(rename = "type", default, deserialize_with = "deserialize_present")]
    pub strategy_type: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub tenure: Option<Value>,
    #[serde(rename = "yield", default, deserialize_with = "deserialize_present")]
    pub yield_rate: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub relief: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyWithInvestments {
    pub strategy: strategy::Model,
    pub investments: Vec<investment::Model>,
}

pub struct StrategyService {
    db: DatabaseConnection,
    delete_policy: DeletePolicy,
}

impl StrategyService {
    pub fn new(db: DatabaseConnection, delete_policy: DeletePolicy) -> Self {
        Self { db, delete_policy }
    }

    pub async fn list_strategies(&self) -> Result<Vec<StrategyWithInvestments>> {
        let rows = StrategyRepository::find_all_with_investments(&self.db).await?;

        Ok(
            rows
                .into_iter()
                .map(|(strategy, investments)| StrategyWithInvestments { strategy, investments })
                .collect()
        )
    }

    pub async fn create_strategy(&self, payload: StrategyPayload) -> Result<StrategyWithInvestments> {
        let mut validator = Validator::new();
        let strategy_type = validator.required("type", payload.strategy_type.as_ref(), parse_string);
        let tenure = validator.required("tenure", payload.tenure.as_ref(), parse_tenure);
        let yield_rate = validator.required("yield", payload.yield_rate.as_ref(), parse_decimal);
        let relief = validator.required("relief", payload.relief.as_ref(), parse_decimal);

        let (Some(strategy_type), Some(tenure), Some(yield_rate), Some(relief)) = (
            strategy_type,
            tenure,
            yield_rate,
            relief,
        ) else {
            return Err(validator.into_errors().into());
        };

        let strategy = StrategyRepository::create(
            &self.db,
            strategy_type,
            tenure,
            yield_rate,
            relief
        ).await?;

        tracing::info!(strategy_id = strategy.id, "Created strategy");

        Ok(StrategyWithInvestments {
            strategy,
            investments: Vec::new(),
        })
    }

    pub async fn get_strategy(&self, id: i32) -> Result<StrategyWithInvestments> {
        let strategy = StrategyRepository::find_by_id(&self.db, id).await?.ok_or_else(||
            AppError::strategy_not_found(id)
        )?;

        let investments = InvestmentRepository::find_by_strategy(&self.db, id).await?;

        Ok(StrategyWithInvestments { strategy, investments })
    }

    /// Updates only the supplied fields. Rate changes do not touch the
    /// returns already recorded on investments.
    pub async fn update_strategy(
        &self,
        id: i32,
        payload: StrategyPayload
    ) -> Result<StrategyWithInvestments> {
        let txn = self.db.begin().await?;

        let Some(strategy) = StrategyRepository::find_by_id(&txn, id).await? else {
            txn.rollback().await?;
            return Err(AppError::strategy_not_found(id));
        };

        let mut validator = Validator::new();
        let strategy_type = validator.optional("type", payload.strategy_type.as_ref(), parse_string);
        let tenure = validator.optional("tenure", payload.tenure.as_ref(), parse_tenure);
        let yield_rate = validator.optional("yield", payload.yield_rate.as_ref(), parse_decimal);
        let relief = validator.optional("relief", payload.relief.as_ref(), parse_decimal);

        if let Err(errors) = validator.finish() {
            txn.rollback().await?;
            return Err(errors.into());
        }

        let strategy = StrategyRepository::update(
            &txn,
            strategy,
            strategy_type,
            tenure,
            yield_rate,
            relief
        ).await?;
        let investments = InvestmentRepository::find_by_strategy(&txn, id).await?;

        txn.commit().await?;

        tracing::debug!(strategy_id = id, "Updated strategy");

        Ok(StrategyWithInvestments { strategy, investments })
    }

    pub async fn delete_strategy(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;

        if StrategyRepository::find_by_id(&txn, id).await?.is_none() {
            txn.rollback().await?;
            return Err(AppError::strategy_not_found(id));
        }

        let investments = InvestmentRepository::count_by_strategy(&txn, id).await?;

        match self.delete_policy {
            DeletePolicy::Restrict if investments > 0 => {
                txn.rollback().await?;
                return Err(
                    AppError::Conflict(
                        format!("Strategy {} still has {} investment(s)", id, investments)
                    )
                );
            }
            DeletePolicy::Restrict => {}
            DeletePolicy::Cascade => {
                InvestmentRepository::delete_by_strategy(&txn, id).await?;
            }
        }

        StrategyRepository::delete(&txn, id).await?;

        txn.commit().await?;

        tracing::info!(
            strategy_id = id,
            investments_removed = investments,
            policy = %self.delete_policy,
            "Deleted strategy"
        );

        Ok(())
    }
}

/// Tenure is a whole number of months.
fn parse_tenure(value: &Value) -> std::result::Result<i32, Rule> {
    let tenure = parse_integer(value)?;
    if tenure < 1 { Err(Rule::AtLeastOne) } else { Ok(tenure) }
}
