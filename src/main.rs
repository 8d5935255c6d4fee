use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use frontend::{
    AppState,
    config::Config,
    error::{AppError, Result},
    form::{self, CommentInput, ConfirmDialog},
    handlers::{self, DeleteTarget, LikeOutcome},
    models::PostId,
    routes::{self, Navigation, Route},
    views,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "frontend", version, about = "Terminal client for the posts GraphQL API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 打开一个页面：/、/login、/register、/posts/:postId
    Open { path: String },
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        confirm_password: String,
    },
    Logout,
    /// 发帖
    Post { body: String },
    /// 点赞或取消点赞
    Like { post_id: String },
    Comment { post_id: String, body: String },
    DeletePost {
        post_id: String,
        /// 跳过确认
        #[arg(long)]
        yes: bool,
    },
    DeleteComment {
        post_id: String,
        comment_id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志，输出到 stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialise client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Using GraphQL endpoint {}", state.api.endpoint());

    match run(&mut state, cli.command).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            for message in e.user_messages() {
                eprintln!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &mut AppState, command: Command) -> Result<String> {
    match command {
        Command::Open { path } => {
            let route = Route::parse(&path)
                .ok_or_else(|| AppError::NotFound(format!("No page at {}", path)))?;
            open(state, route).await
        }
        Command::Login { username, password } => {
            let mut login_form = form::login_form();
            login_form.on_change("username", username);
            login_form.on_change("password", password);
            let navigation = guard(state, Route::Login);
            if let Navigation::Redirect(target) = navigation {
                return open(state, target).await;
            }
            let target = handlers::login(state, &mut login_form).await?;
            open(state, target.target().clone()).await
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let mut register_form = form::register_form();
            register_form.on_change("username", username);
            register_form.on_change("email", email);
            register_form.on_change("password", password);
            register_form.on_change("confirmPassword", confirm_password);
            if let Navigation::Redirect(target) = guard(state, Route::Register) {
                return open(state, target).await;
            }
            let target = handlers::register(state, &mut register_form).await?;
            open(state, target.target().clone()).await
        }
        Command::Logout => {
            handlers::logout(state)?;
            open(state, Route::Home).await
        }
        Command::Post { body } => {
            handlers::load_posts(state).await?;
            let mut post_form = form::post_form();
            post_form.on_change("body", body);
            handlers::create_post(state, &mut post_form).await?;
            open(state, Route::Home).await
        }
        Command::Like { post_id } => {
            let post_id = PostId::new(post_id);
            handlers::load_post(state, &post_id).await?;
            match handlers::like_post(state, &post_id).await? {
                LikeOutcome::Updated(_) => open(state, Route::Post(post_id)).await,
                LikeOutcome::LoginRequired => open(state, Route::Login).await,
            }
        }
        Command::Comment { post_id, body } => {
            let post_id = PostId::new(post_id);
            handlers::load_post(state, &post_id).await?;
            let mut input = CommentInput::new();
            input.on_change(body);
            handlers::create_comment(state, &post_id, &mut input).await?;
            open(state, Route::Post(post_id)).await
        }
        Command::DeletePost { post_id, yes } => {
            let target = DeleteTarget::Post(PostId::new(post_id));
            delete(state, target, yes, || tracing::debug!("Post deleted, returning home")).await?;
            open(state, Route::Home).await
        }
        Command::DeleteComment {
            post_id,
            comment_id,
            yes,
        } => {
            let post_id = PostId::new(post_id);
            handlers::load_post(state, &post_id).await?;
            let target = DeleteTarget::Comment {
                post_id: post_id.clone(),
                comment_id,
            };
            delete(state, target, yes, || {}).await?;
            open(state, Route::Post(post_id)).await
        }
    }
}

fn guard(state: &AppState, route: Route) -> Navigation {
    let identity = state.session.identity();
    routes::guard(route, identity.as_ref())
}

async fn delete<F: FnOnce()>(
    state: &mut AppState,
    target: DeleteTarget,
    confirmed: bool,
    on_deleted: F,
) -> Result<()> {
    let mut dialog = ConfirmDialog::default();
    dialog.open();
    if !confirmed && !confirm(target.tooltip()) {
        dialog.close();
        return Ok(());
    }
    handlers::confirm_delete(state, &target, &mut dialog, Some(on_deleted)).await
}

// 读不到输入时按取消处理
fn confirm(prompt: &str) -> bool {
    use std::io::Write;

    eprint!("{}? Are you sure? [y/N] ", prompt);
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

/// 经过守卫后渲染页面
async fn open(state: &mut AppState, route: Route) -> Result<String> {
    let navigation = guard(state, route);
    let route = navigation.target().clone();
    let identity = state.session.identity();
    let now = Utc::now();

    let mut out = views::render_menu(identity.as_ref(), &route);
    out.push_str("\n\n");
    if let Navigation::Redirect(target) = &navigation {
        tracing::debug!("Redirected to {}", target);
    }

    let body = match &route {
        Route::Home => {
            let posts = handlers::load_posts(state).await?;
            views::render_home(Some(&posts), identity.as_ref(), &form::post_form(), now)
        }
        Route::Login => views::render_login(&form::login_form(), false),
        Route::Register => views::render_register(&form::register_form(), false),
        Route::Post(post_id) => {
            let post = handlers::load_post(state, post_id).await?;
            views::render_single_post(post.as_ref(), identity.as_ref(), &CommentInput::new(), now)
        }
    };
    out.push_str(&body);
    Ok(out)
}
