//! CLI command implementations

pub mod pack;
pub mod sprites;
