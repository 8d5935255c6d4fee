use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// 服务器签发的令牌载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub username: String,
    pub iat: i64, // 签发时间
    pub exp: i64, // 过期时间
}

/// 客户端没有服务器密钥，只解码载荷，不校验签名和过期
pub fn decode_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(token_data.claims)
}

/// 生成类似 "2 hours ago" 的相对时间
pub fn from_now(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();
    let (past, seconds) = if seconds >= 0 {
        (true, seconds)
    } else {
        (false, -seconds)
    };

    let minutes = (seconds as f64 / 60.0).round() as i64;
    let hours = (seconds as f64 / 3600.0).round() as i64;
    let days = (seconds as f64 / 86400.0).round() as i64;

    let phrase = if seconds < 45 {
        "a few seconds".to_string()
    } else if seconds < 90 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if minutes < 90 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{} hours", hours)
    } else if hours < 36 {
        "a day".to_string()
    } else if days < 26 {
        format!("{} days", days)
    } else if days < 45 {
        "a month".to_string()
    } else if days < 320 {
        format!("{} months", (days as f64 / 30.4).round() as i64)
    } else if days < 548 {
        "a year".to_string()
    } else {
        format!("{} years", (days as f64 / 365.0).round() as i64)
    };

    if past {
        format!("{} ago", phrase)
    } else {
        format!("in {}", phrase)
    }
}
