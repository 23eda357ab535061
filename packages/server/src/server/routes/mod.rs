// HTTP routes
pub mod admin;
pub mod health;
pub mod public;
pub mod session;

pub use health::*;
