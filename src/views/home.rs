use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::forms::render_errors;
use super::post_card::render_post_card;
use crate::form::FormState;
use crate::models::{Identity, Post};

/// `posts` 为 None 表示列表尚未加载
pub fn render_home(
    posts: Option<&[Post]>,
    identity: Option<&Identity>,
    post_form: &FormState,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::from("Recent Posts\n\n");

    if identity.is_some() {
        let _ = writeln!(out, "Create a post: {}", post_form.value("body"));
        if !post_form.errors().is_empty() {
            out.push_str(&render_errors(post_form.errors()));
        }
        out.push('\n');
    }

    match posts {
        None => out.push_str("Loading posts...\n"),
        Some(posts) => {
            for post in posts {
                out.push_str(&render_post_card(post, identity, now));
                out.push('\n');
            }
        }
    }
    out
}
