//! Domain-level operations composed from one or more endpoint calls.

mod space_admin;

pub use space_admin::{GetSpaceQuotaRequest, GetSpaceQuotaRequestBuilder, SpaceAdmin, SpaceQuota};
