//! 页面路由与登录守卫

use std::fmt;

use crate::models::{Identity, PostId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Post(PostId),
}

impl Route {
    /// 支持 `/`、`/login`、`/register`、`/posts/:postId`，其余返回 None
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match trimmed {
            "/" | "" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            other => {
                let post_id = other.strip_prefix("/posts/")?;
                if post_id.is_empty() || post_id.contains('/') {
                    None
                } else {
                    Some(Route::Post(PostId::new(post_id)))
                }
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Post(id) => format!("/posts/{}", id),
        }
    }

    /// 仅允许未登录用户访问
    pub fn unauthenticated_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    /// 菜单栏高亮项：首页为 home，其余取去掉斜杠的路径
    pub fn menu_item(&self) -> String {
        match self {
            Route::Home => "home".to_string(),
            other => other.path().trim_start_matches('/').to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    pub fn target(&self) -> &Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }
}

/// 已登录用户访问登录/注册页时重定向到首页
pub fn guard(route: Route, identity: Option<&Identity>) -> Navigation {
    if route.unauthenticated_only() && identity.is_some() {
        Navigation::Redirect(Route::Home)
    } else {
        Navigation::Render(route)
    }
}
