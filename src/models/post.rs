use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 帖子 ID，由服务器分配
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        PostId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
    pub like_count: u32,
    pub comment_count: u32,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// 当前用户是否点过赞，每次读取时重新计算
    pub fn is_liked_by(&self, username: &str) -> bool {
        self.likes.iter().any(|like| like.username == username)
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }

    /// 将部分字段合并进来，未出现的字段保持原值
    pub fn merged(&self, patch: &PostPatch) -> Post {
        let mut next = self.clone();
        if let Some(body) = &patch.body {
            next.body = body.clone();
        }
        if let Some(likes) = &patch.likes {
            next.likes = likes.clone();
        }
        if let Some(like_count) = patch.like_count {
            next.like_count = like_count;
        }
        if let Some(comments) = &patch.comments {
            next.comments = comments.clone();
        }
        if let Some(comment_count) = patch.comment_count {
            next.comment_count = comment_count;
        }
        next
    }
}

/// likePost / createComment / deleteComment 返回的部分帖子
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub id: PostId,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub likes: Option<Vec<Like>>,
    #[serde(default)]
    pub like_count: Option<u32>,
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
    #[serde(default)]
    pub comment_count: Option<u32>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::{comment, like, post};
    use super::*;
    use serde_json::json;

    #[test]
    fn liked_is_derived_from_viewer_username() {
        let mut p = post("1", "carol");
        p.likes = vec![like("alice")];
        p.like_count = 1;

        assert!(p.is_liked_by("alice"));
        assert!(!p.is_liked_by("bob"));
        assert_eq!(p.likes, vec![like("alice")]);
    }

    #[test]
    fn merge_only_touches_present_fields() {
        let mut p = post("1", "carol");
        p.comments = vec![comment("c1", "dave", "hi")];
        p.comment_count = 1;

        let patch = PostPatch {
            id: PostId::new("1"),
            likes: Some(vec![like("alice")]),
            like_count: Some(1),
            ..Default::default()
        };
        let merged = p.merged(&patch);

        assert_eq!(merged.like_count, 1);
        assert_eq!(merged.likes.len(), 1);
        assert_eq!(merged.comments, p.comments);
        assert_eq!(merged.body, p.body);
    }

    #[test]
    fn post_parses_from_camel_case_wire_format() {
        let p: Post = serde_json::from_value(json!({
            "id": "61a0",
            "body": "hello",
            "createdAt": "2021-11-19T12:34:56.789Z",
            "username": "alice",
            "likeCount": 0,
            "commentCount": 1,
            "likes": [],
            "comments": [{
                "id": "c1", "body": "first", "username": "bob",
                "createdAt": "2021-11-19T13:00:00.000Z"
            }]
        }))
        .unwrap();

        assert_eq!(p.id, PostId::new("61a0"));
        assert_eq!(p.comment_count, 1);
        assert_eq!(p.comments[0].username, "bob");
    }

    #[test]
    fn patch_parses_like_payload() {
        let patch: PostPatch = serde_json::from_value(json!({
            "id": "61a0",
            "likes": [{ "id": "l1", "username": "alice" }],
            "likeCount": 1
        }))
        .unwrap();

        assert_eq!(patch.like_count, Some(1));
        assert!(patch.comments.is_none());
    }
}
