//! Tenant/session boundary.
//!
//! Authentication happens upstream; requests arrive with the resolved
//! identity in headers. This module only consumes that identity and maps it
//! to a kitchen membership.

mod extractor;
mod membership;

pub use extractor::TenantContext;
pub use membership::member_id_for;
