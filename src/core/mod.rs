pub mod config;
pub mod cycle;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use cycle::DayCycle;
pub use error::{GameError, Result};
