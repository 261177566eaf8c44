pub mod check_config;
pub mod complete;
pub mod serve;
