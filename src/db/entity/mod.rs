pub mod user;
pub mod wallet;
pub mod strategy;
pub mod investment;

pub use user::Entity as User;
pub use wallet::Entity as Wallet;
pub use strategy::Entity as Strategy;
pub use investment::Entity as Investment;
