//! 会话状态：当前登录用户，由持久化的令牌恢复

pub mod storage;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::error::AppError;
use crate::models::Identity;

pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};

pub struct SessionStore {
    storage: Box<dyn TokenStorage>,
    identity: watch::Sender<Option<Identity>>,
}

impl SessionStore {
    pub fn initialize(storage: impl TokenStorage + 'static) -> Self {
        Self::initialize_at(storage, Utc::now())
    }

    /// 启动时从存储恢复会话。令牌无法解码或已过期时当作未登录并删除令牌，不向调用方报错
    pub fn initialize_at(storage: impl TokenStorage + 'static, now: DateTime<Utc>) -> Self {
        let mut storage: Box<dyn TokenStorage> = Box::new(storage);

        let persisted = match storage.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read persisted token, starting logged out: {}", e);
                None
            }
        };

        let had_token = persisted.is_some();
        let identity = persisted.and_then(|token| match Identity::from_token(&token) {
            Ok(identity) if !identity.is_expired_at(now) => Some(identity),
            Ok(identity) => {
                tracing::info!("Persisted token for {} has expired", identity.username);
                None
            }
            Err(e) => {
                tracing::warn!("Discarding malformed persisted token: {}", e);
                None
            }
        });

        if had_token && identity.is_none() {
            if let Err(e) = storage.clear() {
                tracing::warn!("Failed to remove stale token: {}", e);
            }
        } else if identity.is_some() {
            tracing::debug!("Restored session from persisted token");
        }

        let (identity, _) = watch::channel(identity);
        Self { storage, identity }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    pub fn username(&self) -> Option<String> {
        self.identity.borrow().as_ref().map(|i| i.username.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.identity.borrow().as_ref().map(|i| i.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.borrow().is_some()
    }

    /// 订阅会话变化，login / logout 会同步通知
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }

    pub fn storage(&self) -> &dyn TokenStorage {
        self.storage.as_ref()
    }

    /// 先写存储再替换内存会话；写入失败时会话保持不变
    pub fn login(&mut self, identity: Identity) -> Result<(), AppError> {
        self.storage.save(&identity.token)?;
        tracing::info!("User {} logged in", identity.username);
        self.identity.send_replace(Some(identity));
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), AppError> {
        self.storage.clear()?;
        if let Some(previous) = self.identity.send_replace(None) {
            tracing::info!("User {} logged out", previous.username);
        }
        Ok(())
    }

    /// 运行中发现令牌过期时登出，返回是否发生了登出
    pub fn expire_if_stale(&mut self, now: DateTime<Utc>) -> Result<bool, AppError> {
        let expired = self
            .identity
            .borrow()
            .as_ref()
            .is_some_and(|identity| identity.is_expired_at(now));
        if expired {
            tracing::info!("Session token expired");
            self.logout()?;
        }
        Ok(expired)
    }
}
