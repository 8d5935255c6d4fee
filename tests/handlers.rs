//! 处理函数对模拟 GraphQL 服务器的端到端测试

mod common;

use chrono::Duration;
use common::{
    MockGraphQl, auth_json, comment_json, mint_token, post_json, user_input_error,
};
use frontend::{
    error::AppError,
    form::{self, CommentInput, ConfirmDialog},
    handlers::{self, DeleteTarget, LikeOutcome},
    models::PostId,
    routes::{Navigation, Route},
    session::{FileTokenStorage, MemoryTokenStorage, TokenStorage},
};
use serde_json::json;

fn listed_ids(state: &frontend::AppState) -> Vec<String> {
    state
        .cache
        .read_posts()
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.id.0)
        .collect()
}

// =============================================================================
// Session
// =============================================================================

mod session {
    use super::*;

    #[tokio::test]
    async fn login_persists_token_and_redirects_home() {
        let server = MockGraphQl::start().await;
        let token = mint_token("alice", Duration::hours(1));
        server.reply("login", json!({ "data": { "login": auth_json("alice", &token) } })).await;

        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("jwtToken");
        let mut state = server.app(FileTokenStorage::new(&token_path));

        let mut login_form = form::login_form();
        login_form.on_change("username", "alice");
        login_form.on_change("password", "secret");

        let navigation = handlers::login(&mut state, &mut login_form).await.unwrap();

        assert_eq!(navigation, Navigation::Redirect(Route::Home));
        assert_eq!(state.session.username().as_deref(), Some("alice"));
        assert_eq!(std::fs::read_to_string(&token_path).unwrap(), token);

        let sent = &server.requests().await[0];
        assert_eq!(sent.operation, "login");
        assert_eq!(sent.variables, json!({ "username": "alice", "password": "secret" }));
    }

    #[tokio::test]
    async fn login_field_errors_land_on_the_form() {
        let server = MockGraphQl::start().await;
        server.reply(
            "login",
            user_input_error(json!({ "general": "Wrong credentials" })),
        ).await;
        let mut state = server.app(MemoryTokenStorage::new());

        let mut login_form = form::login_form();
        login_form.on_change("username", "alice");
        let err = handlers::login(&mut state, &mut login_form).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.user_messages(), vec!["Wrong credentials"]);
        assert_eq!(login_form.errors()["general"], "Wrong credentials");
        assert!(state.session.identity().is_none());
        assert_eq!(state.session.storage().load().unwrap(), None);
    }

    #[tokio::test]
    async fn register_sends_register_input_and_logs_in() {
        let server = MockGraphQl::start().await;
        let token = mint_token("bob", Duration::hours(1));
        server.reply("register", json!({ "data": { "register": auth_json("bob", &token) } })).await;
        let mut state = server.app(MemoryTokenStorage::new());

        let mut register_form = form::register_form();
        register_form.on_change("username", "bob");
        register_form.on_change("email", "bob@example.com");
        register_form.on_change("password", "pw");
        register_form.on_change("confirmPassword", "pw");

        handlers::register(&mut state, &mut register_form).await.unwrap();

        assert_eq!(state.session.token().as_deref(), Some(token.as_str()));
        assert_eq!(server.requests().await[0].variables["confirmPassword"], "pw");
    }

    #[tokio::test]
    async fn requests_carry_the_session_token_until_logout() {
        let server = MockGraphQl::start().await;
        let token = mint_token("alice", Duration::hours(1));
        server
            .reply_authorized("getPosts", &token, json!({ "data": { "getPosts": [] } }))
            .await;
        server.reply("getPosts", json!({ "data": { "getPosts": [] } })).await;
        let mut state = server.app(MemoryTokenStorage::with_token(token.clone()));

        handlers::fetch_posts(&mut state).await.unwrap();
        handlers::logout(&mut state).unwrap();
        handlers::fetch_posts(&mut state).await.unwrap();

        assert_eq!(server.count("getPosts").await, 2);
    }

    #[tokio::test]
    async fn expired_persisted_token_starts_logged_out() {
        let server = MockGraphQl::start().await;
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("jwtToken");
        std::fs::write(&token_path, mint_token("alice", Duration::hours(-1))).unwrap();

        let state = server.app(FileTokenStorage::new(&token_path));

        assert!(state.session.identity().is_none());
        assert!(!token_path.exists());
    }
}

// =============================================================================
// Posts
// =============================================================================

mod posts {
    use super::*;

    async fn logged_in_with_posts(server: &MockGraphQl) -> frontend::AppState {
        server.reply(
            "getPosts",
            json!({ "data": { "getPosts": [post_json("1", "bob", "first"), post_json("2", "carol", "second")] } }),
        ).await;
        let token = mint_token("alice", Duration::hours(1));
        let mut state = server.app(MemoryTokenStorage::with_token(token));
        handlers::load_posts(&mut state).await.unwrap();
        state
    }

    #[tokio::test]
    async fn posts_are_served_from_cache_after_first_load() {
        let server = MockGraphQl::start().await;
        let mut state = logged_in_with_posts(&server).await;

        let posts = handlers::load_posts(&mut state).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(server.count("getPosts").await, 1);
    }

    #[tokio::test]
    async fn created_post_is_prepended_and_body_cleared() {
        let server = MockGraphQl::start().await;
        let mut state = logged_in_with_posts(&server).await;
        server.reply(
            "createPost",
            json!({ "data": { "createPost": post_json("3", "alice", "Hi World") } }),
        ).await;

        let mut post_form = form::post_form();
        post_form.on_change("body", "Hi World");
        let created = handlers::create_post(&mut state, &mut post_form).await.unwrap();

        assert_eq!(created.id, PostId::new("3"));
        assert_eq!(listed_ids(&state), vec!["3", "1", "2"]);
        assert_eq!(post_form.value("body"), "");
        assert_eq!(server.count("getPosts").await, 1);
    }

    #[tokio::test]
    async fn rejected_post_leaves_cache_untouched() {
        let server = MockGraphQl::start().await;
        let mut state = logged_in_with_posts(&server).await;
        server.reply(
            "createPost",
            user_input_error(json!({ "body": "Post body must not be empty" })),
        ).await;
        let before = state.cache.snapshot();

        let mut post_form = form::post_form();
        let err = handlers::create_post(&mut state, &mut post_form).await.unwrap_err();

        assert_eq!(err.user_messages(), vec!["Post body must not be empty"]);
        assert_eq!(state.cache.snapshot(), before);
        assert!(post_form.has_error("body"));
    }

    #[tokio::test]
    async fn field_errors_beside_null_result_reach_the_form() {
        let server = MockGraphQl::start().await;
        let mut state = logged_in_with_posts(&server).await;
        server
            .reply(
                "createPost",
                json!({
                    "data": { "createPost": null },
                    "errors": [{
                        "message": "Errors",
                        "extensions": { "errors": { "body": "Post body must not be empty" } }
                    }]
                }),
            )
            .await;
        let before = state.cache.snapshot();

        let mut post_form = form::post_form();
        let err = handlers::create_post(&mut state, &mut post_form).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(post_form.errors()["body"], "Post body must not be empty");
        assert_eq!(state.cache.snapshot(), before);
    }

    #[tokio::test]
    async fn server_failure_is_generic_and_cache_untouched() {
        let server = MockGraphQl::start().await;
        let mut state = logged_in_with_posts(&server).await;
        server.reply_status("createPost", 502, "bad gateway").await;
        let before = state.cache.snapshot();

        let mut post_form = form::post_form();
        post_form.on_change("body", "hello");
        let err = handlers::create_post(&mut state, &mut post_form).await.unwrap_err();

        assert!(matches!(err, AppError::Http { status: 502, .. }));
        assert_eq!(err.user_messages(), vec!["Something went wrong, please try again"]);
        assert_eq!(state.cache.snapshot(), before);
        assert_eq!(post_form.value("body"), "hello");
    }

    #[tokio::test]
    async fn deleting_a_post_twice_is_a_no_op_the_second_time() {
        let server = MockGraphQl::start().await;
        let mut state = logged_in_with_posts(&server).await;
        server.reply("deletePost", json!({ "data": { "deletePost": true } })).await;

        assert!(handlers::delete_post(&mut state, &PostId::new("1")).await.unwrap());
        assert_eq!(listed_ids(&state), vec!["2"]);

        let after_first = state.cache.snapshot();
        assert!(!handlers::delete_post(&mut state, &PostId::new("1")).await.unwrap());
        assert_eq!(state.cache.snapshot(), after_first);
    }

    #[tokio::test]
    async fn confirmed_post_delete_runs_callback_and_closes_dialog() {
        let server = MockGraphQl::start().await;
        let mut state = logged_in_with_posts(&server).await;
        server.reply("deletePost", json!({ "data": { "deletePost": "Post deleted successfully" } })).await;

        let mut dialog = ConfirmDialog::default();
        dialog.open();
        let mut navigated = None;
        handlers::confirm_delete(
            &mut state,
            &DeleteTarget::Post(PostId::new("2")),
            &mut dialog,
            Some(|| navigated = Some(Route::Home)),
        )
        .await
        .unwrap();

        assert!(!dialog.is_open());
        assert_eq!(navigated, Some(Route::Home));
        assert_eq!(listed_ids(&state), vec!["1"]);
    }

    #[tokio::test]
    async fn like_updates_list_and_detail_views() {
        let server = MockGraphQl::start().await;
        let mut state = logged_in_with_posts(&server).await;
        server.reply(
            "getPost",
            json!({ "data": { "getPost": post_json("1", "bob", "first") } }),
        ).await;
        server.reply(
            "likePost",
            json!({ "data": { "likePost": {
                "id": "1",
                "likes": [{ "id": "l1", "username": "alice" }],
                "likeCount": 1
            } } }),
        ).await;
        let post_id = PostId::new("1");
        handlers::load_post(&mut state, &post_id).await.unwrap();

        let outcome = handlers::like_post(&mut state, &post_id).await.unwrap();

        assert!(matches!(outcome, LikeOutcome::Updated(_)));
        let listed = state.cache.read_posts().unwrap();
        let detail = state.cache.read_post(&post_id).unwrap();
        assert_eq!(listed[0].like_count, 1);
        assert_eq!(detail.like_count, 1);
        assert!(detail.is_liked_by("alice"));
    }

    #[tokio::test]
    async fn anonymous_like_goes_to_login_without_a_request() {
        let server = MockGraphQl::start().await;
        let mut state = server.app(MemoryTokenStorage::new());

        let outcome = handlers::like_post(&mut state, &PostId::new("1")).await.unwrap();

        assert_eq!(outcome, LikeOutcome::LoginRequired);
        assert!(server.requests().await.is_empty());
    }
}

// =============================================================================
// Comments
// =============================================================================

mod comments {
    use super::*;

    async fn viewing_post(server: &MockGraphQl, comments: serde_json::Value) -> frontend::AppState {
        let mut post = post_json("1", "bob", "first");
        post["commentCount"] = json!(comments.as_array().map(|c| c.len()).unwrap_or(0));
        post["comments"] = comments;
        server.reply("getPost", json!({ "data": { "getPost": post } })).await;

        let token = mint_token("alice", Duration::hours(1));
        let mut state = server.app(MemoryTokenStorage::with_token(token));
        handlers::load_post(&mut state, &PostId::new("1")).await.unwrap();
        state
    }

    #[tokio::test]
    async fn submitted_comment_is_merged_and_input_reset() {
        let server = MockGraphQl::start().await;
        let mut state = viewing_post(&server, json!([])).await;
        server.reply(
            "createComment",
            json!({ "data": { "createComment": {
                "id": "1",
                "comments": [comment_json("c1", "alice", "nice")],
                "commentCount": 1
            } } }),
        ).await;

        let mut input = CommentInput::new();
        input.on_change("nice");
        let patch = handlers::create_comment(&mut state, &PostId::new("1"), &mut input)
            .await
            .unwrap();

        assert!(patch.is_some());
        let post = state.cache.read_post(&PostId::new("1")).unwrap();
        assert_eq!(post.comment_count, 1);
        assert_eq!(post.comments[0].body, "nice");
        assert_eq!(input, CommentInput::default());
        assert_eq!(
            server.requests().await.last().unwrap().variables,
            json!({ "postId": "1", "body": "nice" })
        );
    }

    #[tokio::test]
    async fn blank_comment_is_not_sent() {
        let server = MockGraphQl::start().await;
        let mut state = viewing_post(&server, json!([])).await;

        let mut input = CommentInput::new();
        input.on_change("   ");
        let patch = handlers::create_comment(&mut state, &PostId::new("1"), &mut input)
            .await
            .unwrap();

        assert!(patch.is_none());
        assert_eq!(server.count("createComment").await, 0);
    }

    #[tokio::test]
    async fn deleting_the_last_comment_empties_the_post_and_closes_dialog() {
        let server = MockGraphQl::start().await;
        let mut state = viewing_post(&server, json!([comment_json("c1", "alice", "nice")])).await;
        server.reply(
            "deleteComment",
            json!({ "data": { "deleteComment": { "id": "1", "comments": [], "commentCount": 0 } } }),
        ).await;

        let mut dialog = ConfirmDialog::default();
        dialog.open();
        handlers::confirm_delete(
            &mut state,
            &DeleteTarget::Comment {
                post_id: PostId::new("1"),
                comment_id: "c1".to_string(),
            },
            &mut dialog,
            None::<fn()>,
        )
        .await
        .unwrap();

        let post = state.cache.read_post(&PostId::new("1")).unwrap();
        assert!(post.comments.is_empty());
        assert_eq!(post.comment_count, 0);
        assert!(!dialog.is_open());
    }

    #[tokio::test]
    async fn failed_comment_delete_keeps_dialog_open() {
        let server = MockGraphQl::start().await;
        let mut state = viewing_post(&server, json!([comment_json("c1", "alice", "nice")])).await;
        server.reply(
            "deleteComment",
            json!({ "errors": [{ "message": "Action not allowed" }] }),
        ).await;
        let before = state.cache.snapshot();

        let mut dialog = ConfirmDialog::default();
        dialog.open();
        let err = handlers::confirm_delete(
            &mut state,
            &DeleteTarget::Comment {
                post_id: PostId::new("1"),
                comment_id: "c1".to_string(),
            },
            &mut dialog,
            None::<fn()>,
        )
        .await
        .unwrap_err();

        assert_eq!(err.user_messages(), vec!["Action not allowed"]);
        assert!(dialog.is_open());
        assert_eq!(state.cache.snapshot(), before);
    }
}
