pub mod arcade;
pub mod config;
pub mod logger;
