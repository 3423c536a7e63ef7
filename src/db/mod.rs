//! Persistence layer. Every repository function takes the connection or
//! transaction it should run on, so callers decide the transactional scope.

pub mod entity;
pub use entity::*;

mod user_repository;
pub use user_repository::UserRepository;

mod wallet_repository;
pub use wallet_repository::WalletRepository;

mod strategy_repository;
pub use strategy_repository::StrategyRepository;

mod investment_repository;
pub use investment_repository::InvestmentRepository;
