use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::schema::Operation;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::result::{GraphQlRequest, GraphQlResponse};

/// GraphQL 传输层。超时全部交给 reqwest 处理
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: Client,
    endpoint: String,
}

impl GraphQlClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(format!("frontend/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.graphql_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 发送一次操作。有令牌时附带 Bearer 认证头
    pub async fn execute<V, T>(
        &self,
        operation: Operation,
        variables: V,
        token: Option<&str>,
    ) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        debug!(operation = operation.name, endpoint = %self.endpoint, "Sending GraphQL request");

        let request = GraphQlRequest {
            operation_name: operation.name,
            query: operation.document,
            variables,
        };

        let mut builder = self.http.post(&self.endpoint).json(&request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            error!(operation = operation.name, "GraphQL request failed: {}", e);
            AppError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        // 出现校验错误时服务器可能返回 4xx，但响应体仍是 GraphQL 格式
        match serde_json::from_str::<GraphQlResponse>(&body) {
            Ok(envelope) => envelope.into_result().inspect_err(|e| {
                warn!(operation = operation.name, status = status.as_u16(), "GraphQL error: {}", e);
            }),
            Err(_) if !status.is_success() => {
                error!(operation = operation.name, status = status.as_u16(), "Unexpected HTTP status");
                Err(AppError::Http {
                    status: status.as_u16(),
                    body,
                })
            }
            Err(e) => Err(AppError::Parse(format!(
                "{} response could not be decoded: {}",
                operation.name, e
            ))),
        }
    }
}
