use axum::{ extract::State, http::StatusCode };
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;
use crate::services::user_service::{ UserPayload, UserWithWallet };

use super::investment::InvestmentResponse;
use super::{ created, format_timestamp, ok, ApiResponse, AppJson, AppPath, AppState };

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: String,
    pub wallet: WalletResponse,
}

#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl From<UserWithWallet> for UserResponse {
    fn from(record: UserWithWallet) -> Self {
        let UserWithWallet { user, wallet } = record;

        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: format_timestamp(&user.created_at),
            wallet: WalletResponse {
                id: wallet.id,
                balance: wallet.balance,
            },
        }
    }
}

pub async fn list_users(State(state): State<AppState>) -> Result<ApiResponse<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;

    Ok(ok(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UserPayload>
) -> Result<ApiResponse<UserResponse>> {
    let user = state.user_service.create_user(payload).await?;

    Ok(created(user.into()))
}

pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>
) -> Result<ApiResponse<UserResponse>> {
    let user = state.user_service.get_user(id).await?;

    Ok(ok(user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UserPayload>
) -> Result<ApiResponse<UserResponse>> {
    let user = state.user_service.update_user(id, payload).await?;

    Ok(ok(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>
) -> Result<StatusCode> {
    state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_user_investments(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>
) -> Result<ApiResponse<Vec<InvestmentResponse>>> {
    let investments = state.user_service.list_investments(id).await?;

    Ok(ok(investments.into_iter().map(InvestmentResponse::from).collect()))
}
