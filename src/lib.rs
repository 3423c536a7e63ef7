pub mod config;
pub mod error;
pub mod validation;
pub mod db;
pub mod services;
pub mod api;

pub use config::{ Config, DeletePolicy };
pub use error::{ AppError, Result };
