use tokio::sync::watch;

use super::keys::{QueryKey, post_entity_key, post_query_key, posts_query_key};
use super::models::{CacheState, CachedQuery};
use crate::models::{Post, PostId, PostPatch};

/// 按 ID 归一化的帖子缓存。每次写入都是一次整体替换，写入后修订号加一
pub struct PostCache {
    state: CacheState,
    revision: watch::Sender<u64>,
}

impl Default for PostCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PostCache {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: CacheState::default(),
            revision,
        }
    }

    /// 订阅缓存修订号，视图据此重新渲染
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn snapshot(&self) -> CacheState {
        self.state.clone()
    }

    pub fn read_posts(&self) -> Option<Vec<Post>> {
        self.state.resolve_list(&posts_query_key())
    }

    pub fn read_post(&self, post_id: &PostId) -> Option<&Post> {
        self.state.resolve_single(&post_query_key(post_id))
    }

    pub fn entity(&self, post_id: &PostId) -> Option<&Post> {
        self.state.entities.get(post_id)
    }

    pub fn write_posts(&mut self, posts: Vec<Post>) {
        let mut next = self.state.clone();
        let ids: Vec<PostId> = posts.iter().map(|p| p.id.clone()).collect();
        for post in posts {
            next.entities.insert(post.id.clone(), post);
        }
        next.queries.insert(posts_query_key(), CachedQuery::List(ids));
        self.commit(next);
    }

    pub fn write_post(&mut self, post: Post) {
        let mut next = self.state.clone();
        let key = post_query_key(&post.id);
        next.queries.insert(key, CachedQuery::Single(post.id.clone()));
        next.entities.insert(post.id.clone(), post);
        self.commit(next);
    }

    /// 新帖子插到列表最前面，不按 ID 去重。列表未缓存时只保存实体
    pub fn prepend_post(&mut self, post: Post) {
        let mut next = self.state.clone();
        match next.queries.get_mut(&posts_query_key()) {
            Some(CachedQuery::List(ids)) => ids.insert(0, post.id.clone()),
            _ => tracing::debug!("Post list not cached, storing {} only", post_entity_key(&post.id)),
        }
        next.entities.insert(post.id.clone(), post);
        self.commit(next);
    }

    /// 删除帖子实体、它在列表中的位置以及 getPost 查询。找不到时不做任何修改
    pub fn remove_post(&mut self, post_id: &PostId) -> bool {
        let listed = matches!(
            self.state.queries.get(&posts_query_key()),
            Some(CachedQuery::List(ids)) if ids.contains(post_id)
        );
        let single_key = post_query_key(post_id);
        if !listed
            && !self.state.entities.contains_key(post_id)
            && !self.state.queries.contains_key(&single_key)
        {
            return false;
        }

        let mut next = self.state.clone();
        if let Some(CachedQuery::List(ids)) = next.queries.get_mut(&posts_query_key()) {
            ids.retain(|id| id != post_id);
        }
        next.queries.remove(&single_key);
        next.entities.remove(post_id);
        self.commit(next);
        true
    }

    /// 按 ID 合并部分字段，所有引用该实体的查询随之更新。实体不存在时忽略
    pub fn merge(&mut self, patch: &PostPatch) -> bool {
        let Some(current) = self.state.entities.get(&patch.id) else {
            tracing::debug!("{} not cached, dropping patch", post_entity_key(&patch.id));
            return false;
        };
        let merged = current.merged(patch);
        if merged == *current {
            return true;
        }

        let mut next = self.state.clone();
        next.entities.insert(patch.id.clone(), merged);
        self.commit(next);
        true
    }

    fn commit(&mut self, next: CacheState) {
        self.state = next;
        self.revision.send_modify(|revision| *revision += 1);
    }

    #[cfg(test)]
    pub(crate) fn query(&self, key: &QueryKey) -> Option<&CachedQuery> {
        self.state.queries.get(key)
    }
}
