use chrono::Utc;
use config::Config;

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod result;
pub mod routes;
pub mod session;
pub mod utils;
pub mod views;

use api::GraphQlClient;
use cache::PostCache;
use error::Result;
use session::{FileTokenStorage, SessionStore, TokenStorage};

/// 客户端状态：会话与缓存只有这一个持有者，所有修改都经由 `&mut`
pub struct AppState {
    pub config: Config,
    pub api: GraphQlClient,
    pub session: SessionStore,
    pub cache: PostCache,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let storage = FileTokenStorage::new(config.token_path.clone());
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: Config, storage: impl TokenStorage + 'static) -> Result<Self> {
        let api = GraphQlClient::new(&config)?;
        let session = SessionStore::initialize(storage);
        Ok(Self {
            config,
            api,
            session,
            cache: PostCache::new(),
        })
    }

    /// 请求前检查令牌是否过期，过期则登出并不再附带令牌
    pub fn bearer(&mut self) -> Result<Option<String>> {
        self.session.expire_if_stale(Utc::now())?;
        Ok(self.session.token())
    }
}
