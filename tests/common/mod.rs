#![allow(dead_code)]

use investment_api::services::{
    investment_service::InvestmentPayload,
    strategy_service::StrategyPayload,
    user_service::UserPayload,
};
use migration::{ Migrator, MigratorTrait };
use sea_orm::{ ConnectOptions, Database, DatabaseConnection };
use serde_json::{ json, Value };

/// Fresh in-memory database with the full schema. A single connection keeps
/// every query on the same in-memory database.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.expect("Failed to create in-memory SQLite DB");

    Migrator::up(&db, None).await.expect("Failed to run migrations");

    db
}

pub fn user_payload(first_name: &str, last_name: &str, email: &str) -> UserPayload {
    payload(json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": email,
    }))
}

pub fn strategy_payload(strategy_type: &str, tenure: i32, yield_rate: f64, relief: f64) -> StrategyPayload {
    payload(json!({
        "type": strategy_type,
        "tenure": tenure,
        "yield": yield_rate,
        "relief": relief,
    }))
}

pub fn investment_payload(
    user_id: i32,
    strategy_id: i32,
    successful: bool,
    amount: Value
) -> InvestmentPayload {
    payload(json!({
        "user_id": user_id,
        "strategy_id": strategy_id,
        "successful": successful,
        "amount": amount,
    }))
}

pub fn payload<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("Invalid test payload")
}
