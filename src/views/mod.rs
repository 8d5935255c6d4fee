//! 纯文本视图，只读取会话、缓存与临时输入状态

pub mod forms;
pub mod home;
pub mod like_button;
pub mod menu;
pub mod post_card;
pub mod single_post;

pub use forms::{render_errors, render_login, render_register};
pub use home::render_home;
pub use like_button::{LikeAction, LikeButton};
pub use menu::render_menu;
pub use post_card::render_post_card;
pub use single_post::render_single_post;
