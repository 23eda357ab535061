//! Creators domain - content-publishing profiles
//!
//! Creators are created from the admin "New Profile" form, edited and
//! toggled (verified, hidden) afterwards. There is no delete path.

pub mod actions;
pub mod data;
pub mod models;

pub use actions::{create_creator, toggle_creator_hidden, toggle_creator_verified, update_creator};
pub use data::{map_creator, CreatorPatch, NewCreator};
pub use models::{slugify, Creator, Niche, Socials};
