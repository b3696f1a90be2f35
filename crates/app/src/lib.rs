pub mod agent_mode;
pub mod engine;
pub mod params;
pub mod protocol;

pub use engine::Engine;
