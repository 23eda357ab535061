//! Resource wire rows and mutation inputs

pub mod resource_types;
pub mod row;

pub use resource_types::{NewResource, ResourcePatch};
pub use row::{insert_record, map_resource, ResourceRow};
