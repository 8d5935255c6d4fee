//! 变更成功后对本地缓存的确定性修改，不需要重新请求列表

use super::keys::post_entity_key;
use super::store::PostCache;
use crate::models::{Post, PostId, PostPatch};

/// 服务器确认的变更结果
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    PostCreated(Post),
    PostDeleted(PostId),
    PostLiked(PostPatch),
    CommentCreated(PostPatch),
    CommentDeleted(PostPatch),
}

/// 帖子缓存同步操作
pub struct PostCacheOperations;

impl PostCacheOperations {
    /// 返回缓存是否发生了变化
    pub fn apply(cache: &mut PostCache, outcome: MutationOutcome) -> bool {
        match outcome {
            MutationOutcome::PostCreated(post) => {
                Self::post_created(cache, post);
                true
            }
            MutationOutcome::PostDeleted(post_id) => Self::post_deleted(cache, &post_id),
            MutationOutcome::PostLiked(patch)
            | MutationOutcome::CommentCreated(patch)
            | MutationOutcome::CommentDeleted(patch) => Self::post_patched(cache, &patch),
        }
    }

    /// 新建帖子插入列表头部
    fn post_created(cache: &mut PostCache, post: Post) {
        tracing::debug!("Prepending {} to post list", post_entity_key(&post.id));
        cache.prepend_post(post);
    }

    /// 删除帖子；已经不在缓存中属于正常情况，返回 false
    fn post_deleted(cache: &mut PostCache, post_id: &PostId) -> bool {
        let removed = cache.remove_post(post_id);
        if removed {
            tracing::debug!("Removed {} from cache", post_entity_key(post_id));
        } else {
            tracing::debug!("{} already absent from cache", post_entity_key(post_id));
        }
        removed
    }

    /// 点赞与评论的结果按 ID 合并到实体
    fn post_patched(cache: &mut PostCache, patch: &PostPatch) -> bool {
        tracing::debug!("Merging patch into {}", post_entity_key(&patch.id));
        cache.merge(patch)
    }
}
