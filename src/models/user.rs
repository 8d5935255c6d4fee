use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::utils::{Claims, decode_token};

/// login / register 的返回值
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: Option<String>,
    pub token: String,
}

/// 已登录用户。所有字段都必须存在，不允许只填一部分
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub token: String,
}

impl Identity {
    pub fn from_token(token: &str) -> Result<Self, AppError> {
        let claims = decode_token(token)?;
        Self::from_claims(claims, token)
    }

    pub fn from_auth_payload(payload: AuthPayload) -> Result<Self, AppError> {
        let identity = Self::from_token(&payload.token)?;
        if identity.username != payload.username {
            tracing::warn!(
                "Token username {} differs from payload username {}",
                identity.username,
                payload.username
            );
        }
        Ok(identity)
    }

    fn from_claims(claims: Claims, token: &str) -> Result<Self, AppError> {
        let issued_at = DateTime::from_timestamp(claims.iat, 0)
            .ok_or_else(|| AppError::Parse(format!("iat out of range: {}", claims.iat)))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AppError::Parse(format!("exp out of range: {}", claims.exp)))?;

        Ok(Identity {
            id: claims.id,
            username: claims.username,
            email: claims.email,
            issued_at,
            expires_at,
            token: token.to_string(),
        })
    }

    /// 过期判定精确到毫秒，exp * 1000 < now 即视为过期
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.timestamp_millis() < now.timestamp_millis()
    }
}
