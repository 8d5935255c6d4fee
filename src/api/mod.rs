pub mod client;
pub mod schema;

pub use client::GraphQlClient;
pub use schema::Operation;
