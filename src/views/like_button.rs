use crate::models::{Identity, Post};
use crate::routes::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeAction {
    Toggle,
    /// 未登录时跳转到登录页
    Navigate(Route),
}

/// 点赞按钮的展示状态，每次渲染时根据会话与点赞列表重新推导
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeButton {
    pub liked: bool,
    pub like_count: u32,
    pub action: LikeAction,
}

impl LikeButton {
    pub fn derive(post: &Post, identity: Option<&Identity>) -> Self {
        let liked = identity.is_some_and(|identity| post.is_liked_by(&identity.username));
        let action = match identity {
            Some(_) => LikeAction::Toggle,
            None => LikeAction::Navigate(Route::Login),
        };
        Self {
            liked,
            like_count: post.like_count,
            action,
        }
    }

    pub fn tooltip(&self) -> &'static str {
        if self.liked { "Unlike" } else { "Like" }
    }

    pub fn render(&self) -> String {
        let heart = if self.liked { "♥" } else { "♡" };
        match &self.action {
            LikeAction::Toggle => format!("[{} {}] ({})", heart, self.like_count, self.tooltip()),
            LikeAction::Navigate(route) => format!("[{} {}] (login: {})", heart, self.like_count, route),
        }
    }
}
