pub mod commands;
pub mod errors;
pub mod member;
pub mod value_objects;

pub use errors::*;
pub use member::{Member, NewMember};
pub use value_objects::*;
