use axum::{ extract::State, http::StatusCode };
use rust_decimal::{ Decimal, RoundingStrategy };
use serde::Serialize;

use crate::error::Result;
use crate::services::strategy_service::{ StrategyPayload, StrategyWithInvestments };

use super::investment::InvestmentResponse;
use super::{ created, format_timestamp, ok, ApiResponse, AppJson, AppPath, AppState };

/// Rates are shown with two decimals; the stored value is never rounded.
pub fn display_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Serialize)]
pub struct StrategyResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub strategy_type: String,
    pub tenure: i32,
    #[serde(rename = "yield", with = "rust_decimal::serde::float")]
    pub yield_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub relief: Decimal,
    pub investments: Vec<InvestmentResponse>,
    pub created_at: String,
}

impl From<StrategyWithInvestments> for StrategyResponse {
    fn from(record: StrategyWithInvestments) -> Self {
        let StrategyWithInvestments { strategy, investments } = record;

        Self {
            id: strategy.id,
            strategy_type: strategy.strategy_type,
            tenure: strategy.tenure,
            yield_rate: display_rate(strategy.yield_rate),
            relief: display_rate(strategy.relief),
            investments: investments.into_iter().map(InvestmentResponse::from).collect(),
            created_at: format_timestamp(&strategy.created_at),
        }
    }
}

pub async fn list_strategies(
    State(state): State<AppState>
) -> Result<ApiResponse<Vec<StrategyResponse>>> {
    let strategies = state.strategy_service.list_strategies().await?;

    Ok(ok(strategies.into_iter().map(StrategyResponse::from).collect()))
}

pub async fn create_strategy(
    State(state): State<AppState>,
    AppJson(payload): AppJson<StrategyPayload>
) -> Result<ApiResponse<StrategyResponse>> {
    let strategy = state.strategy_service.create_strategy(payload).await?;

    Ok(created(strategy.into()))
}

pub async fn get_strategy(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>
) -> Result<ApiResponse<StrategyResponse>> {
    let strategy = state.strategy_service.get_strategy(id).await?;

    Ok(ok(strategy.into()))
}

pub async fn update_strategy(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<StrategyPayload>
) -> Result<ApiResponse<StrategyResponse>> {
    let strategy = state.strategy_service.update_strategy(id, payload).await?;

    Ok(ok(strategy.into()))
}

pub async fn delete_strategy(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>
) -> Result<StatusCode> {
    state.strategy_service.delete_strategy(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
