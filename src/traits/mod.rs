//! Trait definitions for Cloud Foundry operations.
//!
//! Each resource type implements the traits its endpoints support,
//! encapsulating URL templates and wire formats in the implementations.

mod create;
mod delete;
mod get;
mod list;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::{List, DEFAULT_RESULTS_PER_PAGE};
pub(crate) use list::MAX_PAGES;
