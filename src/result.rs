use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{AppError, FieldErrors};

/// GraphQL 请求体
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: V,
}

/// GraphQL 响应体，`data` 与 `errors` 可能同时存在。
/// `data` 先保留为 JSON，确认没有错误后再解码成具体类型
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<GraphQlError>,
}

// `"errors": null` 与缺省等价
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<GraphQlError>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<GraphQlError>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

impl GraphQlResponse {
    /// 只看第一个错误：带字段映射的是校验错误，否则是服务器错误
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, AppError> {
        if let Some(first) = self.errors.into_iter().next() {
            let field_errors = first
                .extensions
                .and_then(|ext| ext.errors)
                .filter(|errors| !errors.is_empty());
            return Err(match field_errors {
                Some(errors) => AppError::Validation(errors),
                None => AppError::Server(first.message),
            });
        }

        match self.data {
            Some(Value::Null) | None => Err(AppError::Parse(
                "response carried neither data nor errors".into(),
            )),
            Some(data) => serde_json::from_value(data)
                .map_err(|e| AppError::Parse(format!("unexpected data shape: {}", e))),
        }
    }
}
