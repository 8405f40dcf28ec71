pub mod config;
pub mod vault;
pub mod work;
