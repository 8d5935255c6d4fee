use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::like_button::LikeButton;
use crate::models::{Identity, Post};
use crate::routes::Route;
use crate::utils::from_now;

pub fn render_post_card(post: &Post, identity: Option<&Identity>, now: DateTime<Utc>) -> String {
    let route = Route::Post(post.id.clone());
    let mut out = String::new();

    let _ = writeln!(out, "┌ {}  ·  {} ({})", post.username, from_now(post.created_at, now), route);
    let _ = writeln!(out, "│ {}", post.body);

    let like = LikeButton::derive(post, identity);
    let _ = write!(out, "└ {}  [✉ {}] ({})", like.render(), post.comment_count, route);
    if identity.is_some_and(|identity| post.is_owned_by(&identity.username)) {
        out.push_str("  [🗑 Delete post]");
    }
    out.push('\n');
    out
}
