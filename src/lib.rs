pub mod classify;
pub mod config;
pub mod cursor;
pub mod executor;
pub mod logging;
pub mod planner;
pub mod types;
pub mod utils;
