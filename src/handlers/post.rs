use crate::AppState;
use crate::api::schema::{
    BodyVariables, CREATE_POST_MUTATION, CreatePostData, DELETE_POST_MUTATION, DeletePostData,
    FETCH_POST_QUERY, FETCH_POSTS_QUERY, GetPostData, GetPostsData, LIKE_POST_MUTATION,
    LikePostData, NoVariables, PostIdVariables,
};
use crate::cache::{MutationOutcome, PostCacheOperations};
use crate::error::{AppError, Result};
use crate::form::FormState;
use crate::models::{Post, PostId, PostPatch};

/// 优先读缓存，没有缓存时请求列表
pub async fn load_posts(state: &mut AppState) -> Result<Vec<Post>> {
    match state.cache.read_posts() {
        Some(posts) => Ok(posts),
        None => fetch_posts(state).await,
    }
}

pub async fn fetch_posts(state: &mut AppState) -> Result<Vec<Post>> {
    let token = state.bearer()?;
    let data: GetPostsData = state
        .api
        .execute(FETCH_POSTS_QUERY, NoVariables {}, token.as_deref())
        .await?;

    tracing::debug!("Fetched {} posts", data.get_posts.len());
    state.cache.write_posts(data.get_posts);
    Ok(state.cache.read_posts().unwrap_or_default())
}

pub async fn load_post(state: &mut AppState, post_id: &PostId) -> Result<Option<Post>> {
    if let Some(post) = state.cache.read_post(post_id) {
        return Ok(Some(post.clone()));
    }

    let token = state.bearer()?;
    let data: GetPostData = state
        .api
        .execute(FETCH_POST_QUERY, PostIdVariables { post_id }, token.as_deref())
        .await?;

    match data.get_post {
        Some(post) => {
            state.cache.write_post(post);
            Ok(state.cache.read_post(post_id).cloned())
        }
        None => Ok(None),
    }
}

/// 发帖成功后插入列表头部并清空输入；失败时缓存不变
pub async fn create_post(state: &mut AppState, form: &mut FormState) -> Result<Post> {
    let body = form.value("body").to_string();
    let token = state.bearer()?;

    let result = state
        .api
        .execute::<_, CreatePostData>(CREATE_POST_MUTATION, BodyVariables { body: &body }, token.as_deref())
        .await;

    let post = match result {
        Ok(data) => data.create_post,
        Err(e) => {
            if let AppError::Validation(errors) = &e {
                form.set_errors(errors.clone());
            }
            return Err(e);
        }
    };

    tracing::info!("Created post {}", post.id);
    PostCacheOperations::apply(&mut state.cache, MutationOutcome::PostCreated(post.clone()));
    form.reset_field("body");
    form.clear_errors();
    Ok(post)
}

/// 返回本地缓存是否删除了条目；条目已不存在属于正常情况
pub async fn delete_post(state: &mut AppState, post_id: &PostId) -> Result<bool> {
    let token = state.bearer()?;
    let data: DeletePostData = state
        .api
        .execute(DELETE_POST_MUTATION, PostIdVariables { post_id }, token.as_deref())
        .await?;

    tracing::info!("Deleted post {}: {}", post_id, data.delete_post);
    Ok(PostCacheOperations::apply(
        &mut state.cache,
        MutationOutcome::PostDeleted(post_id.clone()),
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub enum LikeOutcome {
    Updated(PostPatch),
    /// 未登录时点赞按钮跳转到登录页
    LoginRequired,
}

/// 同一个操作既是点赞也是取消点赞，由服务器切换
pub async fn like_post(state: &mut AppState, post_id: &PostId) -> Result<LikeOutcome> {
    let Some(token) = state.bearer()? else {
        return Ok(LikeOutcome::LoginRequired);
    };

    let data: LikePostData = state
        .api
        .execute(LIKE_POST_MUTATION, PostIdVariables { post_id }, Some(&token))
        .await?;

    PostCacheOperations::apply(
        &mut state.cache,
        MutationOutcome::PostLiked(data.like_post.clone()),
    );
    Ok(LikeOutcome::Updated(data.like_post))
}
