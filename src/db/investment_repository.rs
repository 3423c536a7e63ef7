use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
};

use crate::db::entity::{ investment, Investment };
use crate::error::Result;

pub struct InvestmentRepository;

impl InvestmentRepository {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        strategy_id: i32,
        successful: bool,
        amount: Decimal,
        returns: Decimal
    ) -> Result<investment::Model> {
        let now = chrono::Utc::now();
        let investment = investment::ActiveModel {
            user_id: Set(user_id),
            strategy_id: Set(strategy_id),
            successful: Set(successful),
            amount: Set(amount),
            returns: Set(returns),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let investment = investment.insert(conn).await?;
        Ok(investment)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        id: i32
    ) -> Result<Option<investment::Model>> {
        let investment = Investment::find_by_id(id).one(conn).await?;
        Ok(investment)
    }

    pub async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<investment::Model>> {
        let investments = Investment::find().order_by_asc(investment::Column::Id).all(conn).await?;
        Ok(investments)
    }

    pub async fn find_by_user<C: ConnectionTrait>(
        conn: &C,
        user_id: i32
    ) -> Result<Vec<investment::Model>> {
        let investments = Investment::find()
            .filter(investment::Column::UserId.eq(user_id))
            .order_by_asc(investment::Column::Id)
            .all(conn).await?;

        Ok(investments)
    }

    pub async fn find_by_strategy<C: ConnectionTrait>(
        conn: &C,
        strategy_id: i32
    ) -> Result<Vec<investment::Model>> {
        let investments = Investment::find()
            .filter(investment::Column::StrategyId.eq(strategy_id))
            .order_by_asc(investment::Column::Id)
            .all(conn).await?;

        Ok(investments)
    }

    pub async fn count_by_user<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<u64> {
        let count = Investment::find()
            .filter(investment::Column::UserId.eq(user_id))
            .count(conn).await?;

        Ok(count)
    }

    pub async fn count_by_strategy<C: ConnectionTrait>(conn: &C, strategy_id: i32) -> Result<u64> {
        let count = Investment::find()
            .filter(investment::Column::StrategyId.eq(strategy_id))
            .count(conn).await?;

        Ok(count)
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64> {
        let result = Investment::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_user<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<u64> {
        let result = Investment::delete_many()
            .filter(investment::Column::UserId.eq(user_id))
            .exec(conn).await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_strategy<C: ConnectionTrait>(conn: &C, strategy_id: i32) -> Result<u64> {
        let result = Investment::delete_many()
            .filter(investment::Column::StrategyId.eq(strategy_id))
            .exec(conn).await?;

        Ok(result.rows_affected)
    }
}
