pub mod config;
pub mod engine;
pub mod intake;
pub mod scheduler;

pub use config::EngineConfig;
pub use engine::SceneEngine;
pub use intake::{CommandIntake, CommandQueue, ExternalCommand};
pub use scheduler::{Clock, Debouncer, ManualClock, SystemClock};
