pub mod identifiers;
pub mod time_utils;

pub use identifiers::{validate_sub_account_id, validate_tenant_id};
