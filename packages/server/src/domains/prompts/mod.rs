//! Trending prompts domain - curated image and video generation prompts
//!
//! Prompts have no moderation workflow: admins create and delete them
//! directly and they are always public.

pub mod actions;
pub mod data;
pub mod models;

pub use actions::{create_prompt, delete_prompt};
pub use data::{map_prompt, NewPrompt};
pub use models::{PromptKind, TrendingPrompt};
