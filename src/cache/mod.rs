// 缓存模块
// 归一化的帖子实体表、查询结果以及变更后的同步操作

pub mod keys;
pub mod models;
pub mod operations;
pub mod store;

pub use models::{CacheState, CachedQuery};
pub use operations::{MutationOutcome, PostCacheOperations};
pub use store::PostCache;
