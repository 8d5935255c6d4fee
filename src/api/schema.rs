//! 客户端发出的 GraphQL 操作及其返回结构

use serde::{Deserialize, Serialize};

use crate::models::{AuthPayload, Post, PostId, PostPatch};

/// 一个具名的 GraphQL 文档
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

pub const LOGIN_USER: Operation = Operation {
    name: "login",
    document: r#"
mutation login($username: String!, $password: String!) {
  login(username: $username, password: $password) {
    id
    email
    username
    createdAt
    token
  }
}"#,
};

pub const REGISTER_USER: Operation = Operation {
    name: "register",
    document: r#"
mutation register($username: String!, $email: String!, $password: String!, $confirmPassword: String!) {
  register(
    registerInput: {
      username: $username
      email: $email
      password: $password
      confirmPassword: $confirmPassword
    }
  ) {
    id
    email
    username
    createdAt
    token
  }
}"#,
};

pub const FETCH_POSTS_QUERY: Operation = Operation {
    name: "getPosts",
    document: r#"
query getPosts {
  getPosts {
    id
    body
    createdAt
    username
    likeCount
    likes {
      id
      username
    }
    commentCount
    comments {
      id
      username
      createdAt
      body
    }
  }
}"#,
};

pub const FETCH_POST_QUERY: Operation = Operation {
    name: "getPost",
    document: r#"
query getPost($postId: ID!) {
  getPost(postId: $postId) {
    id
    body
    createdAt
    username
    likeCount
    likes {
      id
      username
    }
    commentCount
    comments {
      id
      username
      createdAt
      body
    }
  }
}"#,
};

pub const CREATE_POST_MUTATION: Operation = Operation {
    name: "createPost",
    document: r#"
mutation createPost($body: String!) {
  createPost(body: $body) {
    id
    body
    createdAt
    username
    likes {
      id
      username
      createdAt
    }
    likeCount
    comments {
      id
      body
      username
      createdAt
    }
    commentCount
  }
}"#,
};

pub const DELETE_POST_MUTATION: Operation = Operation {
    name: "deletePost",
    document: r#"
mutation deletePost($postId: ID!) {
  deletePost(postId: $postId)
}"#,
};

pub const LIKE_POST_MUTATION: Operation = Operation {
    name: "likePost",
    document: r#"
mutation likePost($postId: ID!) {
  likePost(postId: $postId) {
    id
    likes {
      id
      username
    }
    likeCount
  }
}"#,
};

pub const SUBMIT_COMMENT_MUTATION: Operation = Operation {
    name: "createComment",
    document: r#"
mutation createComment($postId: ID!, $body: String!) {
  createComment(postId: $postId, body: $body) {
    id
    comments {
      id
      body
      createdAt
      username
    }
    commentCount
  }
}"#,
};

pub const DELETE_COMMENT_MUTATION: Operation = Operation {
    name: "deleteComment",
    document: r#"
mutation deleteComment($postId: ID!, $commentId: ID!) {
  deleteComment(postId: $postId, commentId: $commentId) {
    id
    comments {
      id
      username
      createdAt
      body
    }
    commentCount
  }
}"#,
};

// 变量

#[derive(Debug, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Serialize)]
pub struct LoginVariables<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVariables<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct BodyVariables<'a> {
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdVariables<'a> {
    pub post_id: &'a PostId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentVariables<'a> {
    pub post_id: &'a PostId,
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentIdVariables<'a> {
    pub post_id: &'a PostId,
    pub comment_id: &'a str,
}

// 返回数据

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub login: AuthPayload,
}

#[derive(Debug, Deserialize)]
pub struct RegisterData {
    pub register: AuthPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPostsData {
    pub get_posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPostData {
    pub get_post: Option<Post>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostData {
    pub create_post: Post,
}

/// 约定返回布尔值，服务器也可能返回一条提示字符串
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostData {
    pub delete_post: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikePostData {
    pub like_post: PostPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentData {
    pub create_comment: PostPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentData {
    pub delete_comment: PostPatch,
}
