//! 缓存键：查询结果的身份
use std::fmt;

use crate::models::PostId;

const POST_ENTITY_PREFIX: &str = "Post:";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// getPosts，固定的帖子列表查询
    Posts,
    /// getPost(postId)
    Post(PostId),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Posts => f.write_str("ROOT_QUERY.getPosts"),
            QueryKey::Post(id) => write!(f, "ROOT_QUERY.getPost({{\"postId\":\"{}\"}})", id),
        }
    }
}

pub fn posts_query_key() -> QueryKey {
    QueryKey::Posts
}

pub fn post_query_key(post_id: &PostId) -> QueryKey {
    QueryKey::Post(post_id.clone())
}

/// 生成帖子实体键，用于日志
pub fn post_entity_key(post_id: &PostId) -> String {
    format!("{}{}", POST_ENTITY_PREFIX, post_id)
}
