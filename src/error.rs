use std::collections::BTreeMap;

use thiserror::Error;

/// 服务器返回的字段级校验错误，字段名 -> 错误信息
pub type FieldErrors = BTreeMap<String, String>;

const GENERIC_MESSAGE: &str = "Something went wrong, please try again";

#[derive(Debug, Error)]
pub enum AppError {
    /// 服务器字段校验失败，例如用户名重复、内容为空
    #[error("validation failed: {}", join_messages(.0))]
    Validation(FieldErrors),

    /// 不带字段信息的 GraphQL 错误
    #[error("server error: {0}")]
    Server(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("invalid credential token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

fn join_messages(errors: &FieldErrors) -> String {
    errors.values().cloned().collect::<Vec<_>>().join("; ")
}

impl AppError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// 展示给用户的错误信息：校验错误和服务器错误原样展示，其余统一提示
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(errors) => errors.values().cloned().collect(),
            AppError::Server(message) => vec![message.clone()],
            AppError::Config(message) | AppError::NotFound(message) => vec![message.clone()],
            AppError::Storage(e) => vec![format!("Could not access the saved session: {}", e)],
            _ => vec![GENERIC_MESSAGE.to_string()],
        }
    }
}
