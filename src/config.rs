use std::env;
use std::fmt;
use std::str::FromStr;

/// What happens to a record's investments (and a user's wallet) when the
/// record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Dependents are deleted in the same transaction.
    #[default]
    Cascade,
    /// Deletion fails while investments still reference the record. A user's
    /// wallet is always removed with the user.
    Restrict,
}

impl DeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletePolicy::Cascade => "cascade",
            DeletePolicy::Restrict => "restrict",
        }
    }
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cascade" => Ok(DeletePolicy::Cascade),
            "restrict" => Ok(DeletePolicy::Restrict),
            other => Err(format!("DELETE_POLICY must be 'cascade' or 'restrict', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub delete_policy: DeletePolicy,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        let delete_policy = match env::var("DELETE_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => DeletePolicy::default(),
        };

        let run_migrations = Self::parse_flag(
            &env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".to_string())
        )?;

        Ok(Config {
            database_url,
            server_host,
            server_port,
            delete_policy,
            run_migrations,
        })
    }

    fn parse_flag(value: &str) -> Result<bool, Box<dyn std::error::Error>> {
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(format!("RUN_MIGRATIONS must be a boolean, got '{}'", other).into()),
        }
    }

    /// Address the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
