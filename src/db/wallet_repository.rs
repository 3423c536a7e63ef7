use rust_decimal::Decimal;
use sea_orm::{ ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set };

use crate::db::entity::{ wallet, Wallet };
use crate::error::Result;

pub struct WalletRepository;

impl WalletRepository {
    /// Wallets only ever start empty.
    pub async fn create_empty<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<wallet::Model> {
        let now = chrono::Utc::now();
        let wallet = wallet::ActiveModel {
            balance: Set(Decimal::ZERO),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let wallet = wallet.insert(conn).await?;
        Ok(wallet)
    }

    pub async fn find_by_user<C: ConnectionTrait>(
        conn: &C,
        user_id: i32
    ) -> Result<Option<wallet::Model>> {
        let wallet = Wallet::find().filter(wallet::Column::UserId.eq(user_id)).one(conn).await?;
        Ok(wallet)
    }

    pub async fn delete_by_user<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<u64> {
        let result = Wallet::delete_many()
            .filter(wallet::Column::UserId.eq(user_id))
            .exec(conn).await?;

        Ok(result.rows_affected)
    }
}
