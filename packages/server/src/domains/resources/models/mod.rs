//! Resource domain models

pub mod resource;

pub use resource::{Category, Resource, ResourceHealth, ResourceStatus};
