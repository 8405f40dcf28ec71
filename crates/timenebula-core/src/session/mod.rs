mod engine;
#[cfg(test)]
mod properties;

pub use engine::{ActiveSession, EngineState, EngineStatus, SessionEngine, Transition};
