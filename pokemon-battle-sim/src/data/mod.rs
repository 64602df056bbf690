//! Static lookup data and caller-supplied input records.

pub mod creature;
pub mod types;
