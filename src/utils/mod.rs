pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{ensure_parent_dir, host_of, strip_extension};
