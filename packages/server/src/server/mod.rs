// HTTP server setup (Axum JSON binding over the directory)
pub mod app;
pub mod error;
pub mod middleware;
pub mod routes;

pub use app::*;
