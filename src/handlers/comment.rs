use crate::AppState;
use crate::api::schema::{
    CommentIdVariables, CommentVariables, CreateCommentData, DELETE_COMMENT_MUTATION,
    DeleteCommentData, SUBMIT_COMMENT_MUTATION,
};
use crate::cache::{MutationOutcome, PostCacheOperations};
use crate::error::Result;
use crate::form::CommentInput;
use crate::models::{PostId, PostPatch};

/// 输入为空白时不发请求，返回 None
pub async fn create_comment(
    state: &mut AppState,
    post_id: &PostId,
    input: &mut CommentInput,
) -> Result<Option<PostPatch>> {
    if !input.can_submit() {
        return Ok(None);
    }

    let token = state.bearer()?;
    let data: CreateCommentData = state
        .api
        .execute(
            SUBMIT_COMMENT_MUTATION,
            CommentVariables {
                post_id,
                body: &input.text,
            },
            token.as_deref(),
        )
        .await?;

    PostCacheOperations::apply(
        &mut state.cache,
        MutationOutcome::CommentCreated(data.create_comment.clone()),
    );
    input.reset();
    Ok(Some(data.create_comment))
}

pub async fn delete_comment(
    state: &mut AppState,
    post_id: &PostId,
    comment_id: &str,
) -> Result<PostPatch> {
    let token = state.bearer()?;
    let data: DeleteCommentData = state
        .api
        .execute(
            DELETE_COMMENT_MUTATION,
            CommentIdVariables {
                post_id,
                comment_id,
            },
            token.as_deref(),
        )
        .await?;

    PostCacheOperations::apply(
        &mut state.cache,
        MutationOutcome::CommentDeleted(data.delete_comment.clone()),
    );
    Ok(data.delete_comment)
}
