pub mod agent;
pub mod config;
pub mod error;
pub mod hand_engine;
pub mod legal;
pub mod passing;
pub mod serialization;
pub mod trick_engine;

pub use agent::{Agent, PassContext, PlayContext, Seats};
pub use config::EngineConfig;
pub use error::{HandError, PassViolation};
pub use hand_engine::{HandEngine, HandOutcome, HandState};
pub use legal::legal_moves;
pub use passing::PassEngine;
pub use trick_engine::{TrickEngine, TrickResult, TrickState};
