//! 基于 wiremock 的 GraphQL 模拟服务器
#![allow(dead_code)]

use chrono::{Duration, Utc};
use frontend::{AppState, config::Config, session::TokenStorage};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation: String,
    pub variables: Value,
}

pub struct MockGraphQl {
    server: MockServer,
}

impl MockGraphQl {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    fn operation(operation: &str) -> MockBuilder {
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({ "operationName": operation })))
    }

    pub async fn reply(&self, operation: &str, body: Value) {
        Self::operation(operation)
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn reply_status(&self, operation: &str, status: u16, body: &str) {
        Self::operation(operation)
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// 只匹配带该令牌的请求，且必须恰好收到一次；需在同一操作的普通回复之前挂载
    pub async fn reply_authorized(&self, operation: &str, token: &str, body: Value) {
        Self::operation(operation)
            .and(header("Authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                let body: Value = request.body_json().unwrap_or(Value::Null);
                RecordedRequest {
                    operation: body["operationName"].as_str().unwrap_or_default().to_string(),
                    variables: body["variables"].clone(),
                }
            })
            .collect()
    }

    pub async fn count(&self, operation: &str) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|r| r.operation == operation)
            .count()
    }

    pub fn config(&self) -> Config {
        let url = format!("{}/", self.server.uri());
        Config::from_lookup(move |key| match key {
            "GRAPHQL_URL" => Some(url.clone()),
            "REQUEST_TIMEOUT" => Some("5".to_string()),
            _ => None,
        })
        .unwrap()
    }

    pub fn app(&self, storage: impl TokenStorage + 'static) -> AppState {
        AppState::with_storage(self.config(), storage).unwrap()
    }
}

pub fn mint_token(username: &str, expires_in: Duration) -> String {
    let now = Utc::now();
    encode(
        &Header::default(),
        &json!({
            "id": format!("id-{}", username),
            "email": format!("{}@example.com", username),
            "username": username,
            "iat": now.timestamp(),
            "exp": (now + expires_in).timestamp(),
        }),
        &EncodingKey::from_secret(b"server-secret"),
    )
    .unwrap()
}

pub fn post_json(id: &str, username: &str, body: &str) -> Value {
    json!({
        "id": id,
        "body": body,
        "createdAt": "2024-05-01T10:00:00.000Z",
        "username": username,
        "likeCount": 0,
        "commentCount": 0,
        "likes": [],
        "comments": []
    })
}

pub fn comment_json(id: &str, username: &str, body: &str) -> Value {
    json!({
        "id": id,
        "body": body,
        "createdAt": "2024-05-01T11:00:00.000Z",
        "username": username
    })
}

pub fn auth_json(username: &str, token: &str) -> Value {
    json!({
        "id": format!("id-{}", username),
        "email": format!("{}@example.com", username),
        "username": username,
        "createdAt": "2024-05-01T09:00:00.000Z",
        "token": token
    })
}

pub fn user_input_error(errors: Value) -> Value {
    json!({
        "data": null,
        "errors": [{
            "message": "Errors",
            "extensions": { "code": "BAD_USER_INPUT", "errors": errors }
        }]
    })
}
