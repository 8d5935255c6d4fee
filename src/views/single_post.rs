use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::like_button::LikeButton;
use crate::form::CommentInput;
use crate::models::{Identity, Post};
use crate::utils::from_now;

pub fn render_single_post(
    post: Option<&Post>,
    identity: Option<&Identity>,
    input: &CommentInput,
    now: DateTime<Utc>,
) -> String {
    let Some(post) = post else {
        return "Loading post..\n".to_string();
    };
    let viewer = identity.map(|i| i.username.as_str());

    let mut out = String::new();
    let _ = writeln!(out, "{}  ·  {}", post.username, from_now(post.created_at, now));
    let _ = writeln!(out, "{}", post.body);
    let _ = write!(
        out,
        "{}  [✉ {}]",
        LikeButton::derive(post, identity).render(),
        post.comment_count
    );
    if viewer.is_some_and(|name| post.is_owned_by(name)) {
        out.push_str("  [🗑 Delete post]");
    }
    out.push_str("\n\n");

    if identity.is_some() {
        let submit = if input.can_submit() { "Submit" } else { "Submit (disabled)" };
        let cursor = if input.focused { "_" } else { "" };
        let _ = writeln!(out, "Post a comment: {}{}  [{}]\n", input.text, cursor, submit);
    }

    for comment in &post.comments {
        let _ = write!(out, "  {}  ·  {}", comment.username, from_now(comment.created_at, now));
        if viewer == Some(comment.username.as_str()) {
            out.push_str("  [🗑 Delete comment]");
        }
        let _ = writeln!(out, "\n  {}\n", comment.body);
    }
    out
}
