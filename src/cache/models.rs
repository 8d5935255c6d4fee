//! 缓存数据模型
use std::collections::HashMap;

use super::keys::QueryKey;
use crate::models::{Post, PostId};

/// 查询结果只保存实体 ID，实体本身存放在实体表中
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedQuery {
    List(Vec<PostId>),
    Single(PostId),
}

/// 缓存的全部内容，可整体比较
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheState {
    pub entities: HashMap<PostId, Post>,
    pub queries: HashMap<QueryKey, CachedQuery>,
}

impl CacheState {
    /// 按查询结果的 ID 顺序取出帖子，缺失的实体跳过
    pub fn resolve_list(&self, key: &QueryKey) -> Option<Vec<Post>> {
        match self.queries.get(key)? {
            CachedQuery::List(ids) => Some(
                ids.iter()
                    .filter_map(|id| self.entities.get(id).cloned())
                    .collect(),
            ),
            CachedQuery::Single(_) => None,
        }
    }

    pub fn resolve_single(&self, key: &QueryKey) -> Option<&Post> {
        match self.queries.get(key)? {
            CachedQuery::Single(id) => self.entities.get(id),
            CachedQuery::List(_) => None,
        }
    }
}
