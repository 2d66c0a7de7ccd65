//! Cloud Foundry API model types.

mod buildpack;
mod package;
mod resource;
mod space_quota_definition;
mod token;
mod upload;

pub use buildpack::*;
pub use package::*;
pub use resource::*;
pub use space_quota_definition::*;
pub use token::*;
