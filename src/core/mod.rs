pub mod config;
pub mod cost;
pub mod search;
pub mod strategy;


// Re-export commonly used items for convenience
pub use config::*;
pub use cost::*;
pub use search::*;
pub use strategy::*;
