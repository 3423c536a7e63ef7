pub mod user_service;
pub mod strategy_service;
pub mod investment_service;

pub use user_service::UserService;
pub use strategy_service::StrategyService;
pub use investment_service::InvestmentService;
