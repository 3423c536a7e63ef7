use axum::{ extract::State, http::StatusCode };
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::entity::investment;
use crate::error::Result;
use crate::services::investment_service::InvestmentPayload;

use super::{ created, format_timestamp, ok, ApiResponse, AppJson, AppPath, AppState };

#[derive(Debug, Serialize)]
pub struct InvestmentResponse {
    pub id: i32,
    pub user_id: i32,
    pub strategy_id: i32,
    pub successful: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub returns: Decimal,
    pub created_at: String,
}

impl From<investment::Model> for InvestmentResponse {
    fn from(investment: investment::Model) -> Self {
        Self {
            id: investment.id,
            user_id: investment.user_id,
            strategy_id: investment.strategy_id,
            successful: investment.successful,
            amount: investment.amount,
            returns: investment.returns,
            created_at: format_timestamp(&investment.created_at),
        }
    }
}

pub async fn list_investments(
    State(state): State<AppState>
) -> Result<ApiResponse<Vec<InvestmentResponse>>> {
    let investments = state.investment_service.list_investments().await?;

    Ok(ok(investments.into_iter().map(InvestmentResponse::from).collect()))
}

pub async fn create_investment(
    State(state): State<AppState>,
    AppJson(payload): AppJson<InvestmentPayload>
) -> Result<ApiResponse<InvestmentResponse>> {
    let investment = state.investment_service.create_investment(payload).await?;

    Ok(created(investment.into()))
}

pub async fn get_investment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>
) -> Result<ApiResponse<InvestmentResponse>> {
    let investment = state.investment_service.get_investment(id).await?;

    Ok(ok(investment.into()))
}

pub async fn delete_investment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>
) -> Result<StatusCode> {
    state.investment_service.delete_investment(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
