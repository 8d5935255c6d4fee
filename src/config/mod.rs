use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub graphql_url: String,
    pub token_path: PathBuf,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 通过任意查找函数构造配置，未设置的项使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let graphql_url = lookup("GRAPHQL_URL").unwrap_or_else(|| "http://localhost:5000/".into());
        if !graphql_url.starts_with("http://") && !graphql_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "GRAPHQL_URL must start with http:// or https://, got {}",
                graphql_url
            )));
        }

        Ok(Config {
            graphql_url,
            token_path: lookup("TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("jwtToken")),
            request_timeout_secs: parse_secs(&lookup, "REQUEST_TIMEOUT", 30)?,
            connect_timeout_secs: parse_secs(&lookup, "CONNECT_TIMEOUT", 10)?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

// 允许 "30" 或 "30s"
fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<u64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .trim_end_matches('s')
            .parse::<u64>()
            .map_err(|_| AppError::Config(format!("{} must be a number of seconds, got {}", key, raw))),
    }
}
