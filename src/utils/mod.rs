pub mod log;
pub mod env;
