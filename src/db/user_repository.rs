use sea_orm::{ ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set };

use crate::db::entity::{ user, wallet, User };
use crate::error::Result;

pub struct UserRepository;

impl UserRepository {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        first_name: String,
        last_name: String,
        email: String
    ) -> Result<user::Model> {
        let now = chrono::Utc::now();
        let user = user::ActiveModel {
            first_name: Set(first_name),
            last_name: Set(last_name),
            email: Set(email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user = user.insert(conn).await?;
        Ok(user)
    }

    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<user::Model>> {
        let user = User::find_by_id(id).one(conn).await?;
        Ok(user)
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        conn: &C,
        email: &str
    ) -> Result<Option<user::Model>> {
        let user = User::find().filter(user::Column::Email.eq(email)).one(conn).await?;
        Ok(user)
    }

    /// All users in insertion order, joined with their wallet.
    pub async fn find_all_with_wallet<C: ConnectionTrait>(
        conn: &C
    ) -> Result<Vec<(user::Model, Option<wallet::Model>)>> {
        let users = User::find()
            .find_also_related(wallet::Entity)
            .order_by_asc(user::Column::Id)
            .all(conn).await?;

        Ok(users)
    }

    /// Applies only the supplied fields.
    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        user: user::Model,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>
    ) -> Result<user::Model> {
        let mut active_model: user::ActiveModel = user.into();

        if let Some(first_name) = first_name {
            active_model.first_name = Set(first_name);
        }
        if let Some(last_name) = last_name {
            active_model.last_name = Set(last_name);
        }
        if let Some(email) = email {
            active_model.email = Set(email);
        }
        active_model.updated_at = Set(chrono::Utc::now());

        let updated = active_model.update(conn).await?;
        Ok(updated)
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64> {
        let result = User::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected)
    }
}
