use rust_decimal::Decimal;
use sea_orm::{ ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set };

use crate::db::entity::{ investment, strategy, Strategy };
use crate::error::Result;

pub struct StrategyRepository;

impl StrategyRepository {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        strategy_type: String,
        tenure: i32,
        yield_rate: Decimal,
        relief: Decimal
    ) -> Result<strategy::Model> {
        let now = chrono::Utc::now();
        let strategy = strategy::ActiveModel {
            strategy_type: Set(strategy_type),
            tenure: Set(tenure),
            yield_rate: Set(yield_rate),
            relief: Set(relief),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let strategy = strategy.insert(conn).await?;
        Ok(strategy)
    }

    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<strategy::Model>> {
        let strategy = Strategy::find_by_id(id).one(conn).await?;
        Ok(strategy)
    }

    /// All strategies in insertion order with their investments.
    pub async fn find_all_with_investments<C: ConnectionTrait>(
        conn: &C
    ) -> Result<Vec<(strategy::Model, Vec<investment::Model>)>> {
        let strategies = Strategy::find()
            .find_with_related(investment::Entity)
            .order_by_asc(strategy::Column::Id)
            .order_by_asc(investment::Column::Id)
            .all(conn).await?;

        Ok(strategies)
    }

    /// Applies only the supplied fields. Existing investments keep the
    /// returns they were recorded with.
    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        strategy: strategy::Model,
        strategy_type: Option<String>,
        tenure: Option<i32>,
        yield_rate: Option<Decimal>,
        relief: Option<Decimal>
    ) -> Result<strategy::Model> {
        let mut active_model: strategy::ActiveModel = strategy.into();

        if let Some(strategy_type) = strategy_type {
            active_model.strategy_type = Set(strategy_type);
        }
        if let Some(tenure) = tenure {
            active_model.tenure = Set(tenure);
        }
        if let Some(yield_rate) = yield_rate {
            active_model.yield_rate = Set(yield_rate);
        }
        if let Some(relief) = relief {
            active_model.relief = Set(relief);
        }
        active_model.updated_at = Set(chrono::Utc::now());

        let updated = active_model.update(conn).await?;
        Ok(updated)
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64> {
        let result = Strategy::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected)
    }
}
