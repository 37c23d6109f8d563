pub mod curve;
pub mod replay;
pub mod show_config;
