pub mod assistant;
pub mod config;
pub mod refresh;
pub mod vault;
