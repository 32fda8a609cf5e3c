//! CLI Commands

pub mod config;
pub mod presets;
pub mod scan;
pub mod validate;
