// Creator Resource Directory - core library
//
// Creators publish resources (links to tools and templates), visitors browse
// and search them, and admins review scraped submissions before they go live.
// Every admin write is applied optimistically to the in-memory entity store
// and reconciled against the hosted backend.
//
// Domains live in domains/*; infrastructure adapters in kernel/.

pub mod common;
pub mod config;
pub mod directory;
pub mod domains;
pub mod kernel;
pub mod server;
pub mod store;

pub use config::*;
pub use directory::{Directory, LoadSummary};
