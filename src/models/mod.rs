pub mod post;
pub mod user;

pub use post::{Comment, Like, Post, PostId, PostPatch};
pub use user::{AuthPayload, Identity};
