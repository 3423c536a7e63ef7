use sea_orm::{ ConnectionTrait, DatabaseConnection, TransactionTrait };
use serde::Deserialize;
use serde_json::Value;

use crate::config::DeletePolicy;
use crate::db::entity::{ investment, user, wallet };
use crate::db::{ InvestmentRepository, UserRepository, WalletRepository };
use crate::error::{ AppError, Result };
use crate::validation::{ deserialize_present, parse_email, parse_string, Rule, Validator };

/// Raw user fields as submitted. Every field is optional here; the service
/// decides which ones are required for the operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub first_name: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub last_name: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub email: Option<Value>,
}

/// A user together with the wallet created alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserWithWallet {
    pub user: user::Model,
    pub wallet: wallet::Model,
}

pub struct UserService {
    db: DatabaseConnection,
    delete_policy: DeletePolicy,
}

impl UserService {
    pub fn new(db: DatabaseConnection, delete_policy: DeletePolicy) -> Self {
        Self { db, delete_policy }
    }

    pub async fn list_users(&self) -> Result<Vec<UserWithWallet>> {
        let rows = UserRepository::find_all_with_wallet(&self.db).await?;

        rows.into_iter()
            .map(|(user, wallet)| {
                match wallet {
                    Some(wallet) => Ok(UserWithWallet { user, wallet }),
                    None => Err(Self::missing_wallet(user.id)),
                }
            })
            .collect()
    }

    /// Inserts the user and its empty wallet in one transaction.
    pub async fn create_user(&self, payload: UserPayload) -> Result<UserWithWallet> {
        let mut validator = Validator::new();
        let first_name = validator.required("first_name", payload.first_name.as_ref(), parse_string);
        let last_name = validator.required("last_name", payload.last_name.as_ref(), parse_string);
        let email = validator.required("email", payload.email.as_ref(), parse_email);

        let (Some(first_name), Some(last_name), Some(email)) = (first_name, last_name, email) else {
            return Err(validator.into_errors().into());
        };

        let txn = self.db.begin().await?;

        if UserRepository::find_by_email(&txn, &email).await?.is_some() {
            txn.rollback().await?;
            validator.reject("email", Rule::Unique);
            return Err(validator.into_errors().into());
        }

        let inserted = async {
            let user = UserRepository::create(&txn, first_name, last_name, email).await?;
            let wallet = WalletRepository::create_empty(&txn, user.id).await?;
            Ok::<_, AppError>((user, wallet))
        }.await;

        let (user, wallet) = match inserted {
            Ok(rows) => rows,
            Err(e) => {
                txn.rollback().await?;
                tracing::warn!(error = %e, "Rolled back user creation");
                return Err(e);
            }
        };

        txn.commit().await?;

        tracing::info!(user_id = user.id, wallet_id = wallet.id, "Created user with wallet");

        Ok(UserWithWallet { user, wallet })
    }

    pub async fn get_user(&self, id: i32) -> Result<UserWithWallet> {
        let user = UserRepository::find_by_id(&self.db, id).await?.ok_or_else(||
            AppError::user_not_found(id)
        )?;

        Self::with_wallet(&self.db, user).await
    }

    /// Updates only the fields present in the payload.
    pub async fn update_user(&self, id: i32, payload: UserPayload) -> Result<UserWithWallet> {
        let txn = self.db.begin().await?;

        let Some(user) = UserRepository::find_by_id(&txn, id).await? else {
            txn.rollback().await?;
            return Err(AppError::user_not_found(id));
        };

        let mut validator = Validator::new();
        let first_name = validator.optional("first_name", payload.first_name.as_ref(), parse_string);
        let last_name = validator.optional("last_name", payload.last_name.as_ref(), parse_string);
        let email = validator.optional("email", payload.email.as_ref(), parse_email);

        if let Some(email) = &email {
            let taken = UserRepository::find_by_email(&txn, email).await?;
            if taken.is_some_and(|other| other.id != user.id) {
                validator.reject("email", Rule::Unique);
            }
        }

        if validator.has_errors() {
            txn.rollback().await?;
            return Err(validator.into_errors().into());
        }

        let user = UserRepository::update(&txn, user, first_name, last_name, email).await?;
        let updated = Self::with_wallet(&txn, user).await?;

        txn.commit().await?;

        tracing::debug!(user_id = id, "Updated user");

        Ok(updated)
    }

    /// Removes the user, its wallet and, depending on the delete policy, its
    /// investments.
    pub async fn delete_user(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;

        if UserRepository::find_by_id(&txn, id).await?.is_none() {
            txn.rollback().await?;
            return Err(AppError::user_not_found(id));
        }

        let investments = InvestmentRepository::count_by_user(&txn, id).await?;

        match self.delete_policy {
            DeletePolicy::Restrict if investments > 0 => {
                txn.rollback().await?;
                return Err(
                    AppError::Conflict(
                        format!("User {} still has {} investment(s)", id, investments)
                    )
                );
            }
            DeletePolicy::Restrict => {}
            DeletePolicy::Cascade => {
                InvestmentRepository::delete_by_user(&txn, id).await?;
            }
        }

        WalletRepository::delete_by_user(&txn, id).await?;
        UserRepository::delete(&txn, id).await?;

        txn.commit().await?;

        tracing::info!(
            user_id = id,
            investments_removed = investments,
            policy = %self.delete_policy,
            "Deleted user"
        );

        Ok(())
    }

    pub async fn list_investments(&self, user_id: i32) -> Result<Vec<investment::Model>> {
        if UserRepository::find_by_id(&self.db, user_id).await?.is_none() {
            return Err(AppError::user_not_found(user_id));
        }

        InvestmentRepository::find_by_user(&self.db, user_id).await
    }

    async fn with_wallet<C: ConnectionTrait>(conn: &C, user: user::Model) -> Result<UserWithWallet> {
        match WalletRepository::find_by_user(conn, user.id).await? {
            Some(wallet) => Ok(UserWithWallet { user, wallet }),
            None => Err(Self::missing_wallet(user.id)),
        }
    }

    fn missing_wallet(user_id: i32) -> AppError {
        AppError::Internal(format!("User {} has no wallet", user_id))
    }
}
