pub mod config;
pub mod recorder;
