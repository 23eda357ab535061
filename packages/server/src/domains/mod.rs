// Domain modules
pub mod creators;
pub mod engagement;
pub mod media;
pub mod prompts;
pub mod resources;
