use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use strum::{Display, EnumString};

/// How accounts without a stored password are treated at login.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AuthMode {
    /// Provisional accounts accept any secret of at least six characters.
    Demo,
    /// Only accounts with a stored password hash can log in.
    Strict,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub jwt_secret: String,
    /// Seconds a session stays valid after login.
    pub session_ttl: usize,
    pub auth_mode: AuthMode,
    /// Fixed pause before a login attempt is answered.
    pub login_delay_ms: u64,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
}

fn var_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|e| anyhow::anyhow!("{key}={raw:?} is invalid: {e}"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            session_ttl: var_or("SESSION_TTL", "28800")?, // default 8 hours
            auth_mode: var_or("AUTH_MODE", "demo")?,
            login_delay_ms: var_or("LOGIN_DELAY_MS", "0")?,

            rate_login_per_min: var_or("RATE_LOGIN_PER_MIN", "60")?,
            rate_protected_per_min: var_or("RATE_PROTECTED_PER_MIN", "1000")?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_mode_parses_lowercase() {
        assert_eq!(AuthMode::from_str("strict").unwrap(), AuthMode::Strict);
        assert_eq!(AuthMode::Demo.to_string(), "demo");
        assert!(AuthMode::from_str("open").is_err());
    }

    #[test]
    fn var_or_falls_back_to_default() {
        let ttl: usize = var_or("DAYFLOW_TEST_UNSET_VARIABLE", "42").unwrap();
        assert_eq!(ttl, 42);
    }
}
