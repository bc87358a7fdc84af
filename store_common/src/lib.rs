mod helpers;
mod secret;

pub use helpers::{parse_boolean_flag, parse_list};
pub use secret::Secret;
