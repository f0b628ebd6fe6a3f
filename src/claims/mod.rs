pub mod set;

pub use set::{ClaimSet, as_mapping, as_string_list};
