pub mod config_resource;
pub mod output_path;
