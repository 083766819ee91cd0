//! Application configuration assembled from environment variables

use mc_shared::{DatabaseConfig, Environment, JwtConfig, LoggingConfig, ServerConfig};
use serde::{Deserialize, Serialize};
use std::env;

/// Default bcrypt work factor
const DEFAULT_BCRYPT_COST: u32 = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        Config {
            environment,
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            server: ServerConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BCRYPT_COST),
        }
    }

    /// Reject settings the server must not start with
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(format!("BCRYPT_COST must be between 4 and 31, got {}", self.bcrypt_cost));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: Environment) -> Config {
        Config {
            environment,
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::for_environment(environment),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    #[test]
    fn test_default_secret_rejected_in_production() {
        assert!(config(Environment::Development).validate().is_ok());
        assert!(config(Environment::Production).validate().is_err());

        let mut prod = config(Environment::Production);
        prod.jwt = JwtConfig::new("a-real-production-secret");
        assert!(prod.validate().is_ok());
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let mut cfg = config(Environment::Development);
        cfg.bcrypt_cost = 3;
        assert!(cfg.validate().is_err());
    }
}
