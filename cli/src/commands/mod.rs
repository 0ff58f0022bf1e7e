//! Command implementations

pub mod clean_staging;
pub mod config;
pub mod detach;
pub mod version;
