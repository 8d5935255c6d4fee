//! 用户操作：发请求、同步缓存、更新表单与对话框状态

pub mod comment;
pub mod post;
pub mod user;

use crate::AppState;
use crate::error::Result;
use crate::form::ConfirmDialog;
use crate::models::PostId;

pub use comment::{create_comment, delete_comment};
pub use post::{LikeOutcome, create_post, delete_post, fetch_posts, like_post, load_post, load_posts};
pub use user::{login, logout, register};

/// 删除按钮的目标：帖子或帖子下的评论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Post(PostId),
    Comment { post_id: PostId, comment_id: String },
}

impl DeleteTarget {
    pub fn tooltip(&self) -> &'static str {
        match self {
            DeleteTarget::Post(_) => "Delete post",
            DeleteTarget::Comment { .. } => "Delete comment",
        }
    }
}

/// 用户确认删除。成功后关闭对话框，然后调用回调（详情页用来返回首页）；失败时对话框保持打开
pub async fn confirm_delete<F>(
    state: &mut AppState,
    target: &DeleteTarget,
    dialog: &mut ConfirmDialog,
    on_deleted: Option<F>,
) -> Result<()>
where
    F: FnOnce(),
{
    match target {
        DeleteTarget::Post(post_id) => {
            delete_post(state, post_id).await?;
        }
        DeleteTarget::Comment {
            post_id,
            comment_id,
        } => {
            delete_comment(state, post_id, comment_id).await?;
        }
    }

    dialog.close();
    if let Some(callback) = on_deleted {
        callback();
    }
    Ok(())
}
