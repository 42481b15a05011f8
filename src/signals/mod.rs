//! Signal synthesis, alert deduplication, and cycle orchestration.

pub mod dispatcher;
pub mod engine;
pub mod registry;
pub mod synthesizer;

pub use dispatcher::AlertDispatcher;
pub use engine::SignalEngine;
pub use registry::{AlertKey, AlertRegistry};
pub use synthesizer::SignalSynthesizer;
