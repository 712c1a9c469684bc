pub mod config;
pub mod engine;
pub mod operator;
pub mod sequencer;
pub mod voice;

pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;
pub use operator::Operator;
pub use sequencer::Sequencer;
pub use voice::Voice;
