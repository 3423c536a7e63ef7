use std::sync::Arc;

use axum::{ extract::{ FromRequest, FromRequestParts }, http::StatusCode, routing::get, Json, Router };
use chrono::{ DateTime, Utc };
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::{ cors::CorsLayer, trace::TraceLayer };

pub mod user;
pub mod strategy;
pub mod investment;

use crate::config::DeletePolicy;
use crate::error::AppError;
use crate::services::{ InvestmentService, StrategyService, UserService };

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub strategy_service: Arc<StrategyService>,
    pub investment_service: Arc<InvestmentService>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        strategy_service: Arc<StrategyService>,
        investment_service: Arc<InvestmentService>
    ) -> Self {
        Self {
            user_service,
            strategy_service,
            investment_service,
        }
    }

    /// Builds every service on top of the same connection pool.
    pub fn from_connection(db: DatabaseConnection, delete_policy: DeletePolicy) -> Self {
        Self::new(
            Arc::new(UserService::new(db.clone(), delete_policy)),
            Arc::new(StrategyService::new(db.clone(), delete_policy)),
            Arc::new(InvestmentService::new(db))
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/user", get(user::list_users).post(user::create_user))
        .route(
            "/api/user/{id}",
            get(user::get_user)
                .put(user::update_user)
                .patch(user::update_user)
                .delete(user::delete_user)
        )
        .route("/api/user/{id}/investments", get(user::list_user_investments))
        .route("/api/strategy", get(strategy::list_strategies).post(strategy::create_strategy))
        .route(
            "/api/strategy/{id}",
            get(strategy::get_strategy)
                .put(strategy::update_strategy)
                .patch(strategy::update_strategy)
                .delete(strategy::delete_strategy)
        )
        .route(
            "/api/investment",
            get(investment::list_investments).post(investment::create_investment)
        )
        .route(
            "/api/investment/{id}",
            get(investment::get_investment).delete(investment::delete_investment)
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health_check() -> &'static str {
    "OK"
}

/// JSON body extractor whose rejections render as `AppError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path extractor. An id that cannot be parsed cannot exist, so it renders
/// as `NotFound`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

pub type ApiResponse<T> = (StatusCode, Json<DataResponse<T>>);

pub fn ok<T: Serialize>(data: T) -> ApiResponse<T> {
    (StatusCode::OK, Json(DataResponse { data }))
}

pub fn created<T: Serialize>(data: T) -> ApiResponse<T> {
    (StatusCode::CREATED, Json(DataResponse { data }))
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

        assert_eq!(format_timestamp(&timestamp), "2024-03-09 14:05:07");
    }

    #[test]
    fn test_envelope_wraps_data() {
        let (status, Json(body)) = created(vec![1, 2]);

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({ "data": [1, 2] }));
    }
}
