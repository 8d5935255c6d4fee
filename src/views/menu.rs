use crate::models::Identity;
use crate::routes::Route;

/// 登录后显示用户名与 logout，未登录显示 home / login / register
pub fn render_menu(identity: Option<&Identity>, current: &Route) -> String {
    match identity {
        Some(identity) => format!("[{}]{:>width$}", identity.username, "logout", width = 40),
        None => {
            let active = current.menu_item();
            let item = |name: &str| {
                if name == active {
                    format!("[{}]", name)
                } else {
                    name.to_string()
                }
            };
            format!("{}    {}  {}", item("home"), item("login"), item("register"))
        }
    }
}
