mod errors;
mod member_registry;

pub use errors::{MemberApplicationError, Result};
pub use member_registry::MemberRegistry;
